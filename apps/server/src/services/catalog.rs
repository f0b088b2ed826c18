// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upstream catalog client.

use brewcat_core::RecordSet;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Errors from a catalog fetch. None of these are fatal to the server.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Upstream catalog unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Upstream catalog returned {status}")]
    Status { status: StatusCode },

    #[error("Upstream catalog payload could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client for the remote catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    /// Create a new client. `timeout` bounds the whole fetch.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("brewcat-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Network)?;

        Ok(Self {
            url: url.to_string(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full catalog as one JSON array.
    pub async fn fetch(&self) -> Result<RecordSet, CatalogError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(CatalogError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status });
        }

        resp.json::<RecordSet>().await.map_err(|e| {
            // Timeouts while streaming the body surface here too.
            if e.is_decode() {
                CatalogError::Decode(e)
            } else {
                CatalogError::Network(e)
            }
        })
    }
}
