//! CSV-backed record store and roster.
//!
//! Record rows carry 14 fields and no header:
//! `name0..name3, total, win0..win3, draw, odds0..odds3`.
//! Empty name fields mark slots that are not part of the matchup.

use super::{RecordStore, RosterSource, StoreError};
use crate::core::{MatchupRecord, RecordViolation, Roster, SLOTS};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use stillwater::validation::Validation;
use tracing::{debug, info, warn};

/// Number of fields in one persisted record row.
pub const RECORD_FIELDS: usize = 3 * SLOTS + 2;

const TOTAL: usize = SLOTS;
const WINS: usize = TOTAL + 1;
const DRAWS: usize = WINS + SLOTS;
const ODDS: usize = DRAWS + 1;

/// Encode a record as its 14 persisted fields.
pub fn encode_row(record: &MatchupRecord) -> Vec<String> {
    let mut row = Vec::with_capacity(RECORD_FIELDS);
    row.extend(
        record
            .competitors()
            .iter()
            .map(|c| c.clone().unwrap_or_default()),
    );
    row.push(record.total().to_string());
    row.extend(record.wins().iter().map(u32::to_string));
    row.push(record.draws().to_string());
    row.extend(record.odds().iter().map(|&odds| encode_odds(odds)));
    row
}

/// Zero odds, the value a blank entry stores, are written as `0`; other
/// values keep a decimal point.
fn encode_odds(odds: f64) -> String {
    if odds == 0.0 {
        "0".to_string()
    } else {
        format!("{odds:?}")
    }
}

/// Decode one persisted row. `row` is 1-based and only used in errors.
///
/// The decoded record is validated; every broken rule is reported at once.
/// Tolerated violations (see [`RecordViolation::is_tolerated`]) only log
/// a warning.
pub fn decode_row(row: usize, fields: &StringRecord) -> Result<MatchupRecord, StoreError> {
    if fields.len() != RECORD_FIELDS {
        return Err(StoreError::FieldCount {
            row,
            expected: RECORD_FIELDS,
            found: fields.len(),
        });
    }

    let field = |index: usize| fields.get(index).unwrap_or("").trim();
    let parse_err = |index: usize| StoreError::Field {
        row,
        field: index,
        value: field(index).to_string(),
    };
    let count = |index: usize| field(index).parse::<u32>().map_err(|_| parse_err(index));
    let price = |index: usize| field(index).parse::<f64>().map_err(|_| parse_err(index));

    let competitors = std::array::from_fn(|slot| {
        let name = field(slot);
        (!name.is_empty()).then(|| name.to_string())
    });
    let total = count(TOTAL)?;
    let wins = [count(WINS)?, count(WINS + 1)?, count(WINS + 2)?, count(WINS + 3)?];
    let draws = count(DRAWS)?;
    let odds = [price(ODDS)?, price(ODDS + 1)?, price(ODDS + 2)?, price(ODDS + 3)?];

    let record = MatchupRecord::from_parts(competitors, total, wins, draws, odds);
    match record.validate() {
        Validation::Success(()) => Ok(record),
        Validation::Failure(errors) => {
            let (tolerated, fatal): (Vec<_>, Vec<_>) =
                errors.iter().cloned().partition(RecordViolation::is_tolerated);
            for violation in &tolerated {
                warn!(row, %violation, "loading record despite violation");
            }
            if fatal.is_empty() {
                Ok(record)
            } else {
                Err(StoreError::InvalidRecord {
                    row,
                    violations: fatal,
                })
            }
        }
    }
}

/// Record store backed by a single CSV file.
#[derive(Clone, Debug)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn csv_error(&self, source: csv::Error) -> StoreError {
        StoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStore for CsvRecordStore {
    fn load(&mut self) -> Result<Vec<MatchupRecord>, StoreError> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "record file not found, starting empty");
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let fields = result.map_err(|e| self.csv_error(e))?;
            records.push(decode_row(index + 1, &fields)?);
        }
        info!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }

    fn save(&mut self, records: &[MatchupRecord]) -> Result<(), StoreError> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;
        for record in records {
            writer
                .write_record(encode_row(record))
                .map_err(|e| self.csv_error(e))?;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }
}

/// Roster read from a CSV file, one name per row in the first field.
#[derive(Clone, Debug)]
pub struct CsvRoster {
    path: PathBuf,
}

impl CsvRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for CsvRoster {
    fn load_roster(&mut self) -> Result<Roster, StoreError> {
        let csv_error = |source| StoreError::Csv {
            path: self.path.clone(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(csv_error)?;

        let mut seen = BTreeSet::new();
        let mut names = Vec::new();
        for result in reader.records() {
            let fields = result.map_err(csv_error)?;
            let Some(name) = fields.get(0).map(str::trim).filter(|n| !n.is_empty()) else {
                continue;
            };
            if !seen.insert(name.to_string()) {
                return Err(StoreError::DuplicateRosterEntry {
                    name: name.to_string(),
                });
            }
            names.push(name.to_string());
        }
        info!(path = %self.path.display(), count = names.len(), "loaded roster");
        Ok(Roster::new(names))
    }
}
