// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store and reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing the flat-file store
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Row decode error: {0}")]
    Row(#[from] RowError),

    #[error("Row encoder error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// A single row that could not be turned into a record.
///
/// `row` is 1-based, matching the line a user would see in an editor for
/// single-line rows.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row {row}: {kind}")]
pub struct RowError {
    pub row: usize,
    pub kind: RowErrorKind,
}

impl RowError {
    pub fn new(row: usize, kind: RowErrorKind) -> Self {
        Self { row, kind }
    }
}

/// Why a row failed to decode.
#[derive(Debug, Clone, PartialEq)]
pub enum RowErrorKind {
    /// Fewer than the six required fields.
    MissingFields { found: usize },
    InvalidInteger { field: &'static str, value: String },
    InvalidFloat { field: &'static str, value: String },
    /// Rejected by the row parser itself. In practice this is a row that is
    /// not valid UTF-8; the parser accepts stray quotes as literal text.
    Malformed(String),
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowErrorKind::MissingFields { found } => {
                write!(f, "expected 6 fields, found {}", found)
            }
            RowErrorKind::InvalidInteger { field, value } => {
                write!(f, "field '{}' is not an integer: {:?}", field, value)
            }
            RowErrorKind::InvalidFloat { field, value } => {
                write!(f, "field '{}' is not a number: {:?}", field, value)
            }
            RowErrorKind::Malformed(msg) => write!(f, "malformed row: {}", msg),
        }
    }
}
