//! Action signals.
//!
//! Every leaf routine owns one [`ActionSlot`]. Its buttons hold clones of
//! that slot and write a code into it when pressed; the routine takes the
//! code on its next tick. The slot holds at most one code: a second press
//! before the tick overwrites the first instead of queueing behind it.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Integer code identifying what the operator asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionCode(u32);

impl ActionCode {
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single-value mailbox between input capture and a routine.
#[derive(Clone, Debug, Default)]
pub struct ActionSlot {
    pending: Arc<Mutex<Option<ActionCode>>>,
}

impl ActionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `code`, replacing any code not yet consumed.
    pub fn signal(&self, code: ActionCode) {
        *self.lock() = Some(code);
    }

    /// Consume the pending code, leaving the slot neutral.
    pub fn take(&self) -> Option<ActionCode> {
        self.lock().take()
    }

    pub fn peek(&self) -> Option<ActionCode> {
        *self.lock()
    }

    pub fn is_pending(&self) -> bool {
        self.peek().is_some()
    }

    /// Whether both handles refer to the same slot.
    pub fn same_slot(&self, other: &ActionSlot) -> bool {
        Arc::ptr_eq(&self.pending, &other.pending)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ActionCode>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A button's link to the slot it writes and the code it writes.
#[derive(Clone, Debug)]
pub struct Binding {
    slot: ActionSlot,
    code: ActionCode,
}

impl Binding {
    pub fn new(slot: &ActionSlot, code: ActionCode) -> Self {
        Self {
            slot: slot.clone(),
            code,
        }
    }

    pub fn fire(&self) {
        self.slot.signal(self.code);
    }

    pub fn code(&self) -> ActionCode {
        self.code
    }
}
