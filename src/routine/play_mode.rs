//! Composite frame around the record-entry screens.
//!
//! PlayMode owns no elements of its own. It forwards each tick to its
//! child and keeps wrapping the result while the child stays inside the
//! play flow; a result outside the flow replaces PlayMode itself.

use super::{CharacterSelect, Context, Routine, Screen};
use crate::core::ScreenKind;
use crate::session::SessionError;

#[derive(Debug)]
pub struct PlayMode {
    child: Box<Routine>,
}

impl PlayMode {
    pub fn enter(ctx: &mut Context<'_>) -> Self {
        Self {
            child: Box::new(CharacterSelect::enter(ctx).into()),
        }
    }

    pub fn child(&self) -> &Routine {
        &self.child
    }
}

impl Screen for PlayMode {
    const KIND: ScreenKind = ScreenKind::PlayMode;

    fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        let next = (*self.child).execute(ctx)?;
        if next.kind().is_play_child() {
            Ok(PlayMode {
                child: Box::new(next),
            }
            .into())
        } else {
            Ok(next)
        }
    }
}
