// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog endpoints.

use crate::error::ApiError;
use crate::types::{BeersQuery, IndentedJson};
use crate::AppState;
use axum::extract::{Path, Query, State};
use brewcat_core::{find_by_id, Record, RecordSet};
use std::time::Instant;

/// GET /loadbeers - Fetch the upstream catalog and rewrite the local store.
pub async fn load_beers(
    State(state): State<AppState>,
) -> Result<IndentedJson<RecordSet>, ApiError> {
    let start = Instant::now();

    let records = state.catalog.fetch().await?;
    tracing::info!(
        url = %state.catalog.url(),
        count = records.len(),
        "Fetched upstream catalog"
    );

    let records = state.store.replace(records).await?;
    tracing::info!(
        path = %state.store.path().display(),
        count = records.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Catalog refreshed"
    );

    Ok(IndentedJson(records))
}

/// GET /beers - Every stored record.
pub async fn list_beers(
    State(state): State<AppState>,
) -> Result<IndentedJson<RecordSet>, ApiError> {
    let records = state.store.read_all().await?;
    tracing::debug!(count = records.len(), "Listed catalog");
    Ok(IndentedJson(records))
}

/// GET /beers/:id - First stored record with the given id.
pub async fn get_beer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<IndentedJson<Record>, ApiError> {
    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidId(raw_id.clone()))?;

    let records = state.store.read_all().await?;
    match find_by_id(&records, id) {
        Some(record) => Ok(IndentedJson(record.clone())),
        None => {
            tracing::debug!(id, "Record not found");
            Err(ApiError::NotFound)
        }
    }
}

/// GET /fasterbeers?type=odd|even - Concurrent read filtered by id parity.
pub async fn faster_beers(
    State(state): State<AppState>,
    Query(query): Query<BeersQuery>,
) -> Result<IndentedJson<RecordSet>, ApiError> {
    let selection = query.selection();
    let start = Instant::now();

    let report = state.store.read_filtered(selection).await?;

    for err in &report.skipped {
        tracing::warn!(row = err.row, error = %err.kind, "Skipped undecodable row");
    }
    tracing::info!(
        selection = %selection,
        count = report.records.len(),
        filtered_out = report.filtered_out,
        skipped = report.skipped.len(),
        total_rows = report.total_rows,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Concurrent read complete"
    );

    Ok(IndentedJson(report.records))
}
