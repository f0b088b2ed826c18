// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Brewcat Core
//!
//! Catalog records and the local flat-file cache they are kept in.
//!
//! ## Overview
//!
//! - **Records**: one [`Record`] per catalog entry, optionally serde-enabled
//! - **Flat-file store**: headerless six-field rows, see [`FlatFileStore`]
//! - **Concurrent reader**: parallel decode + id-parity filter over the
//!   store, merged into one result set, see [`read_concurrently`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brewcat_core::{read_concurrently, FlatFileStore, Record, Selection};
//!
//! let store = FlatFileStore::new("./beersFromAPI.csv");
//! store.write(&[Record::new(1, "Buzz", "A Real Bitter Experience.", "...", 4.5, 60)])?;
//!
//! let report = read_concurrently(&store, Selection::Odd)?;
//! for record in &report.records {
//!     println!("#{} {}", record.id, record.name);
//! }
//! # Ok::<(), brewcat_core::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable JSON (de)serialization of [`Record`]

pub mod error;
pub mod reader;
pub mod record;
pub mod selection;
pub mod store;

pub use error::{Error, Result, RowError, RowErrorKind};
pub use reader::{filter_rows, read_concurrently, ReadReport};
pub use record::{find_by_id, Record, RecordSet};
pub use selection::Selection;
pub use store::{decode_row, encode_row, FlatFileStore, RawRow, FIELD_COUNT};
