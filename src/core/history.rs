//! Screen navigation history.
//!
//! Records every change of the active leaf screen so a session can report
//! where the operator has been and how long it took.

use super::screen::ScreenKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions kept before the oldest are dropped.
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

/// Record of a single screen change.
///
/// # Example
///
/// ```rust
/// use arena_stats::core::{ScreenKind, ScreenTransition};
/// use chrono::Utc;
///
/// let transition = ScreenTransition {
///     from: ScreenKind::Title,
///     to: ScreenKind::CharacterSelect,
///     timestamp: Utc::now(),
///     tick: 4,
/// };
/// assert!(transition.enters_play_mode());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenTransition {
    /// The leaf screen being left
    pub from: ScreenKind,
    /// The leaf screen being entered
    pub to: ScreenKind,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// The tick on which the transition was taken
    pub tick: u64,
}

impl ScreenTransition {
    pub fn enters_play_mode(&self) -> bool {
        !self.from.is_play_child() && self.to.is_play_child()
    }

    pub fn leaves_play_mode(&self) -> bool {
        self.from.is_play_child() && !self.to.is_play_child()
    }
}

/// Ordered, bounded history of screen transitions.
///
/// # Example
///
/// ```rust
/// use arena_stats::core::{NavigationHistory, ScreenKind, ScreenTransition};
/// use chrono::Utc;
///
/// let mut history = NavigationHistory::new();
/// history.record(ScreenTransition {
///     from: ScreenKind::Title,
///     to: ScreenKind::ReadMode,
///     timestamp: Utc::now(),
///     tick: 1,
/// });
/// history.record(ScreenTransition {
///     from: ScreenKind::ReadMode,
///     to: ScreenKind::Title,
///     timestamp: Utc::now(),
///     tick: 3,
/// });
///
/// assert_eq!(
///     history.path(),
///     vec![ScreenKind::Title, ScreenKind::ReadMode, ScreenKind::Title]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavigationHistory {
    transitions: VecDeque<ScreenTransition>,
    capacity: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHistory {
    /// Create a new empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a new empty history keeping at most `capacity` transitions.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            transitions: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Record a transition, dropping the oldest one when full.
    pub fn record(&mut self, transition: ScreenTransition) {
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of screens traversed.
    ///
    /// Returns the `from` screen of the oldest retained transition, then
    /// the `to` screen of each transition.
    pub fn path(&self) -> Vec<ScreenKind> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Elapsed time from the first to the last retained transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn last(&self) -> Option<&ScreenTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &ScreenTransition> {
        self.transitions.iter()
    }
}
