//! Matchup records and their invariants.
//!
//! A record holds up to four competitors in canonical order together with
//! cumulative outcome counters and the odds last entered for each slot.
//! Every mutation re-checks `total == sum(wins) + draws`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Number of competitor slots in every record and selection.
pub const SLOTS: usize = 4;

/// Competitor names per slot; `None` means the slot is not part of the matchup.
pub type Competitors = [Option<String>; SLOTS];

/// Result of one contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The competitor in this slot won.
    Win(usize),
    Draw,
}

/// A single broken rule found while validating a record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordViolation {
    #[error("total ({total}) does not equal wins plus draws ({sum})")]
    TotalMismatch { total: u32, sum: u64 },

    #[error("competitor '{name}' appears more than once")]
    DuplicateCompetitor { name: String },

    #[error("record names no competitors")]
    NoCompetitors,

    #[error("odds in slot {slot} are not a finite number ({value})")]
    InvalidOdds { slot: usize, value: f64 },

    #[error("empty slot {slot} has {wins} wins")]
    WinsOnEmptySlot { slot: usize, wins: u32 },
}

impl RecordViolation {
    /// Whether a stored record with this violation can still be loaded.
    ///
    /// Older record files may name the same competitor twice; such rows
    /// stay usable, every other violation makes the row unreadable.
    pub fn is_tolerated(&self) -> bool {
        matches!(self, Self::DuplicateCompetitor { .. })
    }
}

/// Errors raised by record mutations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    #[error("slot {slot} is out of range")]
    SlotOutOfRange { slot: usize },

    #[error("slot {slot} has no competitor")]
    EmptySlot { slot: usize },

    #[error("invariant broken: total {total} != wins plus draws {sum}")]
    InvariantBroken { total: u32, sum: u64 },
}

/// Persisted head-to-head statistics for one set of competitors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    competitors: Competitors,
    total: u32,
    wins: [u32; SLOTS],
    draws: u32,
    odds: [f64; SLOTS],
}

impl MatchupRecord {
    /// Assemble a record from raw parts without checking it.
    ///
    /// Callers loading untrusted data must follow up with [`validate`](Self::validate).
    pub fn from_parts(
        competitors: Competitors,
        total: u32,
        wins: [u32; SLOTS],
        draws: u32,
        odds: [f64; SLOTS],
    ) -> Self {
        Self {
            competitors,
            total,
            wins,
            draws,
            odds,
        }
    }

    /// Create the record for a matchup's first contest.
    ///
    /// `competitors` and `odds` must already be in canonical order, and a
    /// `Win` outcome refers to a canonical slot.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arena_stats::core::{MatchupRecord, Outcome};
    ///
    /// let record = MatchupRecord::first_result(
    ///     [Some("Alice".into()), Some("Bob".into()), None, None],
    ///     Outcome::Win(0),
    ///     [1.5, 2.0, 0.0, 0.0],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(record.total(), 1);
    /// assert_eq!(record.wins(), &[1, 0, 0, 0]);
    /// assert_eq!(record.draws(), 0);
    /// ```
    pub fn first_result(
        competitors: Competitors,
        outcome: Outcome,
        odds: [f64; SLOTS],
    ) -> Result<Self, RecordError> {
        let mut record = Self::from_parts(competitors, 0, [0; SLOTS], 0, [0.0; SLOTS]);
        record.record_outcome(outcome, odds)?;
        Ok(record)
    }

    /// Count one more contest and overwrite the stored odds.
    ///
    /// The record is left untouched when the outcome names an empty or
    /// out-of-range slot.
    pub fn record_outcome(
        &mut self,
        outcome: Outcome,
        odds: [f64; SLOTS],
    ) -> Result<(), RecordError> {
        match outcome {
            Outcome::Win(slot) => {
                self.require_competitor(slot)?;
                self.wins[slot] += 1;
            }
            Outcome::Draw => self.draws += 1,
        }
        self.total += 1;
        self.odds = odds;
        self.check_invariant()
    }

    fn require_competitor(&self, slot: usize) -> Result<(), RecordError> {
        match self.competitors.get(slot) {
            None => Err(RecordError::SlotOutOfRange { slot }),
            Some(None) => Err(RecordError::EmptySlot { slot }),
            Some(Some(_)) => Ok(()),
        }
    }

    fn outcome_sum(&self) -> u64 {
        self.wins.iter().map(|&w| u64::from(w)).sum::<u64>() + u64::from(self.draws)
    }

    /// Check `total == sum(wins) + draws`.
    pub fn check_invariant(&self) -> Result<(), RecordError> {
        let sum = self.outcome_sum();
        if u64::from(self.total) == sum {
            Ok(())
        } else {
            Err(RecordError::InvariantBroken {
                total: self.total,
                sum,
            })
        }
    }

    /// Validate every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<RecordViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RecordViolation>>> = Vec::new();

        let sum = self.outcome_sum();
        checks.push(if u64::from(self.total) == sum {
            Validation::success(())
        } else {
            Validation::fail(RecordViolation::TotalMismatch {
                total: self.total,
                sum,
            })
        });

        let names: Vec<&str> = self.names().collect();
        checks.push(if names.is_empty() {
            Validation::fail(RecordViolation::NoCompetitors)
        } else {
            Validation::success(())
        });

        let mut seen = BTreeSet::new();
        for name in names {
            if !seen.insert(name) {
                checks.push(Validation::fail(RecordViolation::DuplicateCompetitor {
                    name: name.to_string(),
                }));
            }
        }

        for (slot, &value) in self.odds.iter().enumerate() {
            if !value.is_finite() {
                checks.push(Validation::fail(RecordViolation::InvalidOdds { slot, value }));
            }
        }

        for slot in self.empty_slots() {
            let wins = self.wins[slot];
            if wins > 0 {
                checks.push(Validation::fail(RecordViolation::WinsOnEmptySlot {
                    slot,
                    wins,
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn competitors(&self) -> &Competitors {
        &self.competitors
    }

    pub fn competitor(&self, slot: usize) -> Option<&str> {
        self.competitors.get(slot)?.as_deref()
    }

    /// Competitor names in slot order, empties skipped.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.competitors.iter().filter_map(|c| c.as_deref())
    }

    /// The order-independent set of competitors.
    pub fn competitor_set(&self) -> BTreeSet<&str> {
        self.names().collect()
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.competitors
            .iter()
            .position(|c| c.as_deref() == Some(name))
    }

    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.competitors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(slot, _)| slot)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn wins(&self) -> &[u32; SLOTS] {
        &self.wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn odds(&self) -> &[f64; SLOTS] {
        &self.odds
    }

    /// Share of contests won by `slot`, as a fraction. `None` when the record
    /// has no contests or the slot does not exist.
    pub fn win_rate(&self, slot: usize) -> Option<f64> {
        let wins = *self.wins.get(slot)?;
        (self.total > 0).then(|| f64::from(wins) / f64::from(self.total))
    }

    pub fn draw_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| f64::from(self.draws) / f64::from(self.total))
    }

    /// Expected return, in percent, of backing `slot` at `odds`.
    ///
    /// A draw refunds the stake, so it contributes its rate at odds 1.
    ///
    /// ```rust
    /// use arena_stats::core::MatchupRecord;
    ///
    /// let record = MatchupRecord::from_parts(
    ///     [Some("A".into()), Some("B".into()), None, None],
    ///     10,
    ///     [3, 6, 0, 0],
    ///     1,
    ///     [0.0; 4],
    /// );
    /// let rate = record.return_rate(0, 2.0).unwrap();
    /// assert_eq!(format!("{rate:.2}"), "70.00");
    /// ```
    pub fn return_rate(&self, slot: usize, odds: f64) -> Option<f64> {
        let win = self.win_rate(slot)?;
        let draw = self.draw_rate()?;
        Some((win * odds + draw) * 100.0)
    }
}
