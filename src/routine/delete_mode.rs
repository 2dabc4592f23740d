//! Confirmation screen for wiping every stored record.

use super::{ignore_unknown, Context, Layout, Owned, Routine, Screen, Title};
use crate::core::ScreenKind;
use crate::session::SessionError;
use tracing::info;

action_enum! {
    pub enum DeleteAction {
        Cancel = 1,
        Confirm = 2,
    }
}

#[derive(Debug)]
pub struct DeleteMode {
    pub(super) own: Owned,
}

impl DeleteMode {
    pub fn enter(ctx: &mut Context<'_>) -> Self {
        let mut layout = Layout::new(ctx);
        layout.button(50, 50, "Back", DeleteAction::Cancel.code());
        layout.label(300, 300, "Delete every stored record? This cannot be undone.");
        layout.button(580, 500, "Delete", DeleteAction::Confirm.code());
        Self {
            own: layout.finish(),
        }
    }
}

impl Screen for DeleteMode {
    const KIND: ScreenKind = ScreenKind::DeleteMode;

    fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        let Some(code) = self.own.take_action() else {
            return Ok(self.into());
        };
        let Some(action) = DeleteAction::decode(code) else {
            ignore_unknown(Self::KIND, code);
            return Ok(self.into());
        };

        if action == DeleteAction::Confirm {
            let removed = ctx.book.len();
            ctx.book.clear();
            ctx.persist()?;
            info!(removed, "deleted all records");
        }
        self.own.release(ctx.registry);
        Ok(Title::enter(ctx).into())
    }
}
