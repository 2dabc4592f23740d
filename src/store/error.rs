//! Errors raised while reading or writing persisted data.

use crate::core::RecordViolation;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("row {row}: expected {expected} fields, found {found}")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}, field {field}: cannot parse {value:?}")]
    Field {
        row: usize,
        field: usize,
        value: String,
    },

    #[error("row {row} is not a valid record: {}", describe(.violations))]
    InvalidRecord {
        row: usize,
        violations: Vec<RecordViolation>,
    },

    #[error("roster entry '{name}' is listed more than once")]
    DuplicateRosterEntry { name: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

fn describe(violations: &[RecordViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
