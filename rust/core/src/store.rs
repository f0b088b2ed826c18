// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat-file store
//!
//! Records are persisted as headerless comma-separated rows with a fixed
//! six-field layout:
//!
//! ```text
//! id,name,tagline,description,abv,ibu
//! ```
//!
//! `abv` is written with one decimal place. Text fields that contain the
//! delimiter, quotes or line breaks are quoted by the row encoder, so they
//! survive a write/read cycle.

use crate::error::{Error, Result, RowError, RowErrorKind};
use crate::record::{Record, RecordSet};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of fields in every stored row.
pub const FIELD_COUNT: usize = 6;

const ID: usize = 0;
const NAME: usize = 1;
const TAGLINE: usize = 2;
const DESCRIPTION: usize = 3;
const ABV: usize = 4;
const IBU: usize = 5;

/// A row as read from disk, before decoding.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based position of the row in the file.
    pub number: usize,
    pub fields: StringRecord,
}

/// Handle on a single backing file.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or truncate the backing file and write one row per record.
    ///
    /// A failure partway through leaves whatever was already written.
    pub fn write(&self, records: &[Record]) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        for record in records {
            writer
                .write_record(encode_row(record))
                .map_err(|e| csv_error(&self.path, e))?;
        }

        let mut file = writer
            .into_inner()
            .map_err(|e| Error::io(&self.path, e.into_error()))?;
        file.flush().map_err(|e| Error::io(&self.path, e))?;
        Ok(())
    }

    /// Read and decode every row. The first undecodable row fails the read.
    pub fn read(&self) -> Result<RecordSet> {
        let mut records = Vec::new();
        for row in self.rows()? {
            let row = row?;
            records.push(decode_row(row.number, &row.fields)?);
        }
        Ok(records)
    }

    /// Read every row without decoding it.
    ///
    /// Rows the row parser rejects come back as per-row errors so callers can
    /// decide whether to skip them. Failing to open the file, or an I/O error
    /// mid-read, fails the whole call.
    pub fn rows(&self) -> Result<Vec<std::result::Result<RawRow, RowError>>> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let number = index + 1;
            match result {
                Ok(fields) => rows.push(Ok(RawRow { number, fields })),
                Err(err) if err.is_io_error() => return Err(csv_error(&self.path, err)),
                Err(err) => rows.push(Err(RowError::new(
                    number,
                    RowErrorKind::Malformed(err.to_string()),
                ))),
            }
        }
        Ok(rows)
    }
}

/// Surface I/O failures from the csv layer as store I/O errors.
fn csv_error(path: &Path, err: csv::Error) -> Error {
    if !err.is_io_error() {
        return Error::Csv(err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::io(path, source),
        other => Error::io(path, std::io::Error::other(format!("{:?}", other))),
    }
}

/// Encode a record into the fixed six-field layout.
pub fn encode_row(record: &Record) -> [String; FIELD_COUNT] {
    [
        record.id.to_string(),
        record.name.clone(),
        record.tagline.clone(),
        record.description.clone(),
        format!("{:.1}", record.abv),
        record.ibu.to_string(),
    ]
}

/// Decode a stored row. Extra trailing fields are ignored.
pub fn decode_row(number: usize, fields: &StringRecord) -> std::result::Result<Record, RowError> {
    if fields.len() < FIELD_COUNT {
        return Err(RowError::new(
            number,
            RowErrorKind::MissingFields {
                found: fields.len(),
            },
        ));
    }

    Ok(Record {
        id: parse_int(number, "id", &fields[ID])?,
        name: fields[NAME].to_string(),
        tagline: fields[TAGLINE].to_string(),
        description: fields[DESCRIPTION].to_string(),
        abv: parse_float(number, "abv", &fields[ABV])?,
        ibu: parse_int(number, "ibu", &fields[IBU])?,
    })
}

fn parse_int(number: usize, field: &'static str, value: &str) -> std::result::Result<i64, RowError> {
    value.trim().parse().map_err(|_| {
        RowError::new(
            number,
            RowErrorKind::InvalidInteger {
                field,
                value: value.to_string(),
            },
        )
    })
}

fn parse_float(number: usize, field: &'static str, value: &str) -> std::result::Result<f64, RowError> {
    fast_float::parse::<f64, _>(value.trim()).map_err(|_| {
        RowError::new(
            number,
            RowErrorKind::InvalidFloat {
                field,
                value: value.to_string(),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;

    fn sample() -> Vec<Record> {
        vec![
            Record::new(1, "A", "t", "d", 4.5, 10),
            Record::new(2, "B", "t", "d", 5.0, 20),
        ]
    }

    fn store_in(dir: &tempfile::TempDir) -> FlatFileStore {
        FlatFileStore::new(dir.path().join("beers.csv"))
    }

    #[test]
    fn test_write_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(&sample()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "1,A,t,d,4.5,10\n2,B,t,d,5.0,20\n");
    }

    #[test]
    fn test_abv_written_with_one_decimal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .write(&[Record::new(3, "C", "t", "d", 7.0, 0), Record::new(4, "D", "t", "d", 12.34, 1)])
            .unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("3,C,t,d,7.0,0"));
        assert!(text.contains("4,D,t,d,12.3,1"));
    }

    #[test]
    fn test_write_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(&sample()).unwrap();
        store.write(&sample()[..1]).unwrap();

        assert_eq!(store.read().unwrap(), sample()[..1].to_vec());
    }

    #[test]
    fn test_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(&sample()).unwrap();

        assert_eq!(store.read().unwrap(), sample());
    }

    #[test]
    fn test_embedded_delimiters_survive() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let records = vec![Record::new(
            9,
            "Hello, \"World\"",
            "line one\nline two",
            "commas, everywhere, here",
            6.2,
            55,
        )];
        store.write(&records).unwrap();

        assert_eq!(store.read().unwrap(), records);
    }

    #[test]
    fn test_ibu_comes_from_last_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "1,A,t,d,4.5,10\n").unwrap();

        let records = store.read().unwrap();
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].ibu, 10);
    }

    #[test]
    fn test_short_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "1,A,t,d,4.5,10\n2,B,t\n").unwrap();

        match store.read() {
            Err(Error::Row(err)) => {
                assert_eq!(err.row, 2);
                assert_eq!(err.kind, RowErrorKind::MissingFields { found: 3 });
            }
            other => panic!("expected row error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_numbers_are_errors_not_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "x1,A,t,d,4.5,10\n").unwrap();
        assert!(matches!(
            store.read(),
            Err(Error::Row(RowError { row: 1, kind: RowErrorKind::InvalidInteger { field: "id", .. } }))
        ));

        fs::write(store.path(), "1,A,t,d,strong,10\n").unwrap();
        assert!(matches!(
            store.read(),
            Err(Error::Row(RowError { kind: RowErrorKind::InvalidFloat { field: "abv", .. }, .. }))
        ));

        fs::write(store.path(), "1,A,t,d,4.5,\n").unwrap();
        assert!(matches!(
            store.read(),
            Err(Error::Row(RowError { kind: RowErrorKind::InvalidInteger { field: "ibu", .. }, .. }))
        ));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let fields = StringRecord::from(vec!["5", "E", "t", "d", "3.3", "7", "extra"]);
        let record = decode_row(1, &fields).unwrap();
        assert_eq!(record, Record::new(5, "E", "t", "d", 3.3, 7));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("absent.csv"));

        assert!(matches!(store.read(), Err(Error::Io { .. })));
        assert!(matches!(store.rows(), Err(Error::Io { .. })));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlatFileStore::new(dir.path().join("no/such/dir/beers.csv"));

        assert!(matches!(store.write(&sample()), Err(Error::Io { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_past_encoder_buffer_is_io_error() {
        let store = FlatFileStore::new("/dev/full");
        let records: Vec<Record> = (0..2_000)
            .map(|i| Record::new(i, format!("beer {i}"), "tagline", "description", 5.0, 40))
            .collect();

        match store.write(&records) {
            Err(Error::Io { path, source }) => {
                assert_eq!(path, PathBuf::from("/dev/full"));
                assert_eq!(source.raw_os_error(), Some(28));
            }
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_reads_as_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(&[]).unwrap();

        assert!(store.read().unwrap().is_empty());
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        (
            any::<i64>(),
            "[a-zA-Z0-9 ,\"']{1,16}",
            "[a-zA-Z0-9 ,.!]{0,24}",
            "[a-zA-Z0-9 ,\n]{0,40}",
            0u32..200,
            0i64..150,
        )
            .prop_map(|(id, name, tagline, description, tenths, ibu)| {
                Record::new(id, name, tagline, description, tenths as f64 / 10.0, ibu)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_read_after_write_returns_same_records(records in prop::collection::vec(arb_record(), 0..20)) {
            let dir = tempfile::tempdir().unwrap();
            let store = store_in(&dir);
            store.write(&records).unwrap();

            prop_assert_eq!(store.read().unwrap(), records);
        }
    }
}
