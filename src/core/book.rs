//! The in-memory collection of matchup records.

use super::canonical::Selection;
use super::record::MatchupRecord;
use std::collections::BTreeSet;

/// Ordered matchup records, in the order they were first created.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordBook {
    records: Vec<MatchupRecord>,
}

impl RecordBook {
    pub fn new(records: Vec<MatchupRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MatchupRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MatchupRecord> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[MatchupRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchupRecord> {
        self.records.iter()
    }

    /// Append a record, returning its index.
    pub fn push(&mut self, record: MatchupRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Index of the record whose competitor set equals the selection's.
    ///
    /// Slot order is irrelevant and empty slots are ignored. When several
    /// records share a set, the most recently created one wins.
    pub fn find_matching(&self, selection: &Selection) -> Option<usize> {
        let wanted = selection.name_set();
        if wanted.is_empty() {
            return None;
        }
        self.records
            .iter()
            .rposition(|record| record.competitor_set() == wanted)
    }

    /// Competitors that have faced every selected name in at least one record.
    ///
    /// The selected names themselves are never suggested. With nothing
    /// selected there are no suggestions.
    pub fn co_occurring(&self, selected: &BTreeSet<&str>) -> BTreeSet<String> {
        if selected.is_empty() {
            return BTreeSet::new();
        }
        self.records
            .iter()
            .filter(|record| {
                let set = record.competitor_set();
                selected.iter().all(|name| set.contains(name))
            })
            .flat_map(|record| record.names())
            .filter(|name| !selected.contains(name))
            .map(str::to_string)
            .collect()
    }
}
