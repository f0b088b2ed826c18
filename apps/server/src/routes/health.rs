// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /health - Health check endpoint.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        service: "brewcat-server".into(),
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "brewcat-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Local flat-file cache of an upstream beer catalog",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "GET",
                path: "/loadbeers",
                description: "Fetch the upstream catalog and rewrite the local store",
            },
            EndpointInfo {
                method: "GET",
                path: "/beers",
                description: "List every stored record",
            },
            EndpointInfo {
                method: "GET",
                path: "/beers/:id",
                description: "Look up one record by id",
            },
            EndpointInfo {
                method: "GET",
                path: "/fasterbeers?type=odd|even",
                description: "List records read concurrently, filtered by id parity",
            },
        ],
    })
}
