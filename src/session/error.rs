//! Errors for session wiring and execution.

use crate::core::{CanonicalError, RecordError};
use crate::store::StoreError;
use thiserror::Error;

/// Errors that end a running session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("record store failure: {0}")]
    Store(#[from] StoreError),

    #[error("record update failed: {0}")]
    Record(#[from] RecordError),

    #[error("selection cannot be laid out: {0}")]
    Canonical(#[from] CanonicalError),

    #[error("record {index} does not exist")]
    MissingRecord { index: usize },

    #[error("session has no active routine; an earlier tick failed")]
    Inactive,
}

/// Errors that can occur when building a session.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Roster not specified. Call .roster(..) or .roster_from(..) before .build()")]
    MissingRoster,

    #[error("Record store not specified. Call .store(..) before .build()")]
    MissingStore,

    #[error("Display surface not specified. Call .surface(..) before .build()")]
    MissingSurface,

    #[error("Roster is empty; add at least one competitor")]
    EmptyRoster,

    #[error("failed to load startup data: {0}")]
    Store(#[from] StoreError),
}
