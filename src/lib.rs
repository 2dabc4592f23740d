//! Arena Stats: head-to-head outcome statistics driven by a polling screen
//! state machine.
//!
//! The operator picks up to four competitors from a fixed roster, records
//! who won each contest (or a draw) together with the offered odds, and
//! reads back win rates and the expected return of backing each competitor.
//!
//! # Architecture
//!
//! - **core**: pure logic (records, canonical slot order, statistics,
//!   screen kinds, navigation history)
//! - **registry**: visual elements with deferred display/forget/destroy
//!   queues and the surface they are drained against
//! - **routine**: one routine per screen; `execute` runs once per tick and
//!   returns the routine that is active next
//! - **store**: CSV persistence for records and roster
//! - **session**: owns all state, runs ticks, and schedules them on a timer
//!
//! # Example
//!
//! ```rust
//! use arena_stats::core::{Roster, ScreenKind};
//! use arena_stats::registry::NullSurface;
//! use arena_stats::session::SessionBuilder;
//! use arena_stats::store::InMemoryStore;
//!
//! let mut session = SessionBuilder::new()
//!     .roster(Roster::new(vec!["Alice".into(), "Bob".into()]))
//!     .store(InMemoryStore::default())
//!     .surface(NullSurface)
//!     .build()
//!     .unwrap();
//!
//! session.tick().unwrap();
//! let play = session.button("Play and record").unwrap();
//! session.press(play);
//! session.tick().unwrap();
//!
//! assert_eq!(
//!     session.screen_path(),
//!     vec![ScreenKind::PlayMode, ScreenKind::CharacterSelect]
//! );
//! ```

pub mod console;
pub mod core;
pub mod registry;
pub mod routine;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use core::{MatchupRecord, Outcome, Roster, ScreenKind};
pub use registry::{ObjectRegistry, Surface};
pub use routine::Routine;
pub use session::{AppConfig, Session, SessionBuilder, SessionError, TickScheduler};
pub use store::{CsvRecordStore, CsvRoster, RecordStore, StoreError};
