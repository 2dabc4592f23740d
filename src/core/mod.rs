//! Pure domain logic.
//!
//! This module contains everything the screens compute without touching
//! widgets or files:
//! - Screen kinds and navigation history
//! - Matchup records, the record book and the roster
//! - Canonical slot ordering of selections
//! - Derived statistics for display

pub mod book;
pub mod canonical;
pub mod history;
pub mod record;
pub mod roster;
pub mod screen;
pub mod stats;

pub use book::RecordBook;
pub use canonical::{display_map, Canonical, CanonicalError, Selection, SortKey};
pub use history::{NavigationHistory, ScreenTransition};
pub use record::{Competitors, MatchupRecord, Outcome, RecordError, RecordViolation, SLOTS};
pub use roster::Roster;
pub use screen::ScreenKind;
pub use stats::Highlight;
