// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use crate::services::CatalogError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Body of the not-found response for record lookups.
pub const NOT_FOUND_MESSAGE: &str = "Resource Not Found: 404";

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] CatalogError),

    #[error("Store I/O error: {0}")]
    Io(String),

    #[error("Store decode error: {0}")]
    Decode(String),

    #[error("Not found")]
    NotFound,

    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Io(_) | ApiError::Decode(_) | ApiError::Join(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Upstream(CatalogError::Network(_)) => "UPSTREAM_UNAVAILABLE",
            ApiError::Upstream(CatalogError::Status { .. }) => "UPSTREAM_STATUS",
            ApiError::Upstream(CatalogError::Decode(_)) => "UPSTREAM_DECODE",
            ApiError::Io(_) => "IO_ERROR",
            ApiError::Decode(_) => "DECODE_ERROR",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::InvalidId(_) => "INVALID_ID",
            ApiError::Join(_) => "TASK_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::NotFound = self {
            return (status, Json(NOT_FOUND_MESSAGE)).into_response();
        }

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<brewcat_core::Error> for ApiError {
    fn from(err: brewcat_core::Error) -> Self {
        match err {
            brewcat_core::Error::Io { .. } => ApiError::Io(err.to_string()),
            brewcat_core::Error::Row(_) | brewcat_core::Error::Csv(_) => {
                ApiError::Decode(err.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewcat_core::{RowError, RowErrorKind};
    use std::path::PathBuf;

    #[test]
    fn test_core_errors_map_to_server_errors() {
        let io = brewcat_core::Error::Io {
            path: PathBuf::from("beers.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let row = brewcat_core::Error::Row(RowError::new(3, RowErrorKind::MissingFields { found: 2 }));

        assert_eq!(ApiError::from(io).status(), StatusCode::INTERNAL_SERVER_ERROR);
        let decode = ApiError::from(row);
        assert!(matches!(decode, ApiError::Decode(_)));
        assert!(decode.to_string().contains("row 3"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidId("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Upstream(CatalogError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
