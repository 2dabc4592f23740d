//! Persistence collaborators.
//!
//! The routines only ever see [`RecordStore`]: load the whole collection
//! once at startup, save the whole collection after every mutation.

pub mod csv;
pub mod error;

pub use self::csv::{CsvRecordStore, CsvRoster, RECORD_FIELDS};
pub use error::StoreError;

use crate::core::{MatchupRecord, Roster};
use std::sync::{Arc, Mutex, PoisonError};

/// Loads and saves the full record collection.
pub trait RecordStore {
    fn load(&mut self) -> Result<Vec<MatchupRecord>, StoreError>;

    /// Replace the persisted collection with `records`.
    fn save(&mut self, records: &[MatchupRecord]) -> Result<(), StoreError>;
}

/// Source of the ordered competitor list.
pub trait RosterSource {
    fn load_roster(&mut self) -> Result<Roster, StoreError>;
}

impl RosterSource for Roster {
    fn load_roster(&mut self) -> Result<Roster, StoreError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Default)]
struct Shelf {
    records: Vec<MatchupRecord>,
    saves: usize,
    failing: bool,
}

/// Store that keeps records in memory.
///
/// Clones share the same contents, so a test can keep a handle after
/// passing the store into a session.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    shelf: Arc<Mutex<Shelf>>,
}

impl InMemoryStore {
    pub fn with_records(records: Vec<MatchupRecord>) -> Self {
        let store = Self::default();
        store.lock().records = records;
        store
    }

    /// Records as last saved.
    pub fn snapshot(&self) -> Vec<MatchupRecord> {
        self.lock().records.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Make every later load and save fail.
    pub fn fail(&self) {
        self.lock().failing = true;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shelf> {
        self.shelf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for InMemoryStore {
    fn load(&mut self) -> Result<Vec<MatchupRecord>, StoreError> {
        let shelf = self.lock();
        if shelf.failing {
            return Err(StoreError::Unavailable("in-memory store set to fail".into()));
        }
        Ok(shelf.records.clone())
    }

    fn save(&mut self, records: &[MatchupRecord]) -> Result<(), StoreError> {
        let mut shelf = self.lock();
        if shelf.failing {
            return Err(StoreError::Unavailable("in-memory store set to fail".into()));
        }
        shelf.records = records.to_vec();
        shelf.saves += 1;
        Ok(())
    }
}
