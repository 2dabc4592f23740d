//! Operator input delivered between ticks.

use crate::registry::ElementId;
use serde::{Deserialize, Serialize};

/// One operator gesture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    /// Click a button.
    Press(ElementId),
    /// Replace the text of an entry field.
    Type { id: ElementId, text: String },
    PointerMove { x: i32, y: i32 },
    PointerDown,
    PointerUp,
    /// Stop the scheduler after the current tick.
    Quit,
}

/// Last known pointer position and button state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub pressed: bool,
}

impl PointerState {
    /// Fold a pointer gesture into the state. Returns `false` for gestures
    /// that are not pointer gestures.
    pub fn apply(&mut self, gesture: &Gesture) -> bool {
        match *gesture {
            Gesture::PointerMove { x, y } => {
                self.x = x;
                self.y = y;
            }
            Gesture::PointerDown => self.pressed = true,
            Gesture::PointerUp => self.pressed = false,
            _ => return false,
        }
        true
    }
}
