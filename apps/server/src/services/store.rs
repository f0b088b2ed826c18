// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared access to the flat-file store.
//!
//! The backing file is guarded by a read-write lock: a refresh holds the
//! write side while it rewrites the file, every reader holds the read side.
//! The owned guard is moved into the blocking task so the lock covers the
//! actual file work.

use crate::error::ApiError;
use brewcat_core::{read_concurrently, FlatFileStore, ReadReport, RecordSet, Selection};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct SharedStore {
    path: PathBuf,
    inner: Arc<RwLock<FlatFileStore>>,
}

impl SharedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            inner: Arc::new(RwLock::new(FlatFileStore::new(path.clone()))),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored catalog. Hands the records back for the response.
    pub async fn replace(&self, records: RecordSet) -> Result<RecordSet, ApiError> {
        let guard = self.inner.clone().write_owned().await;
        let start = Instant::now();

        let records = tokio::task::spawn_blocking(move || {
            let store: &FlatFileStore = &guard;
            store.write(&records).map(|()| records)
        })
        .await??;

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Store rewritten"
        );
        Ok(records)
    }

    /// Read the whole catalog sequentially.
    pub async fn read_all(&self) -> Result<RecordSet, ApiError> {
        let guard = self.inner.clone().read_owned().await;

        let records = tokio::task::spawn_blocking(move || {
            let store: &FlatFileStore = &guard;
            store.read()
        })
        .await??;

        Ok(records)
    }

    /// Read the catalog with the concurrent reader.
    pub async fn read_filtered(&self, selection: Selection) -> Result<ReadReport, ApiError> {
        let guard = self.inner.clone().read_owned().await;

        let report = tokio::task::spawn_blocking(move || {
            let store: &FlatFileStore = &guard;
            read_concurrently(store, selection)
        })
        .await??;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewcat_core::Record;

    #[tokio::test]
    async fn test_replace_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = SharedStore::new(dir.path().join("beers.csv"));
        let records = vec![
            Record::new(1, "A", "t", "d", 4.5, 10),
            Record::new(2, "B", "t", "d", 5.0, 20),
        ];

        let returned = store.replace(records.clone()).await.unwrap();
        assert_eq!(returned, records);
        assert_eq!(store.read_all().await.unwrap(), records);

        let report = store.read_filtered(Selection::Even).await.unwrap();
        assert_eq!(report.records, vec![records[1].clone()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_observe_partial_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SharedStore::new(dir.path().join("beers.csv"));
        let small: RecordSet = (0..10).map(|i| Record::new(i, "s", "t", "d", 1.0, 1)).collect();
        let large: RecordSet = (0..2_000).map(|i| Record::new(i, "l", "t", "d", 2.0, 2)).collect();
        store.replace(small.clone()).await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            let next = if i % 2 == 0 { large.clone() } else { small.clone() };
            tasks.push(tokio::spawn(async move {
                store.replace(next).await.unwrap();
            }));
        }
        for _ in 0..20 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let len = store.read_all().await.unwrap().len();
                assert!(len == 10 || len == 2_000, "torn read: {len} rows");
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_an_api_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SharedStore::new(dir.path().join("absent.csv"));

        assert!(matches!(store.read_all().await, Err(ApiError::Io(_))));
        assert!(matches!(store.read_filtered(Selection::All).await, Err(ApiError::Io(_))));
    }
}
