// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Concurrent filtered reader
//!
//! Rows are read from the store sequentially, then decoded and filtered on
//! the rayon pool. Matching records are merged into a single collection
//! owned by the call and guarded by a mutex that lives only as long as the
//! call. The call returns once every row has been processed.
//!
//! Rows that fail to decode are skipped and reported in
//! [`ReadReport::skipped`]; they never abort the read or touch the merged set.

use crate::error::{Result, RowError};
use crate::record::{Record, RecordSet};
use crate::selection::Selection;
use crate::store::{decode_row, FlatFileStore, RawRow};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Outcome of a concurrent read.
///
/// `records.len() + filtered_out + skipped.len() == total_rows` always holds.
#[derive(Debug, Clone, Default)]
pub struct ReadReport {
    /// Matching records, in no particular order.
    pub records: RecordSet,
    /// Rows that could not be decoded, sorted by row number.
    pub skipped: Vec<RowError>,
    /// Rows that decoded but did not match the selection.
    pub filtered_out: usize,
    pub total_rows: usize,
}

struct Merged {
    records: RecordSet,
    skipped: Vec<RowError>,
}

/// Read the store and return every record whose id matches `selection`.
///
/// Only opening or reading the file can fail; bad rows are reported in the
/// returned [`ReadReport`].
pub fn read_concurrently(store: &FlatFileStore, selection: Selection) -> Result<ReadReport> {
    let rows = store.rows()?;
    Ok(filter_rows(rows, selection))
}

/// Decode and filter already-read rows in parallel.
pub fn filter_rows(
    rows: Vec<std::result::Result<RawRow, RowError>>,
    selection: Selection,
) -> ReadReport {
    merge_rows(rows, selection, |_| {})
}

/// `before_merge` runs on the worker right before it takes the lock.
fn merge_rows<F>(
    rows: Vec<std::result::Result<RawRow, RowError>>,
    selection: Selection,
    before_merge: F,
) -> ReadReport
where
    F: Fn(&Record) + Sync,
{
    let total_rows = rows.len();
    let merged = Mutex::new(Merged {
        records: Vec::with_capacity(total_rows),
        skipped: Vec::new(),
    });
    let filtered_out = AtomicUsize::new(0);

    rows.into_par_iter().for_each(|row| {
        match row.and_then(|raw| decode_row(raw.number, &raw.fields)) {
            Ok(record) if selection.matches(record.id) => {
                before_merge(&record);
                lock(&merged).records.push(record);
            }
            Ok(_) => {
                filtered_out.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => lock(&merged).skipped.push(err),
        }
    });

    let Merged {
        records,
        mut skipped,
    } = merged.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
    skipped.sort_by_key(|e| e.row);

    ReadReport {
        records,
        skipped,
        filtered_out: filtered_out.into_inner(),
        total_rows,
    }
}

/// A worker that panicked mid-push cannot leave a half-written `Vec`, so a
/// poisoned lock is still safe to use.
fn lock(merged: &Mutex<Merged>) -> MutexGuard<'_, Merged> {
    merged.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
