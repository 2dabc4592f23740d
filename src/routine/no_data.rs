//! Shown when no stored record matches the confirmed selection.

use super::{column_x, ignore_unknown, CharacterSelect, Context, Layout, MakeNewData, Owned};
use super::{Routine, Screen};
use crate::core::{ScreenKind, Selection};
use crate::session::SessionError;

action_enum! {
    pub enum NoDataAction {
        Create = 1,
        Reselect = 2,
    }
}

#[derive(Debug)]
pub struct NoData {
    pub(super) own: Owned,
    selection: Selection,
}

impl NoData {
    pub fn enter(ctx: &mut Context<'_>, selection: Selection) -> Self {
        let mut layout = Layout::new(ctx);
        layout.label(450, 100, "No record exists for these competitors");
        for (slot, name) in selection.labels().iter().enumerate() {
            layout.label(column_x(slot) - 50, 200, *name);
        }
        layout.button(550, 500, "Create new record", NoDataAction::Create.code());
        layout.button(550, 600, "Back to selection", NoDataAction::Reselect.code());
        Self {
            own: layout.finish(),
            selection,
        }
    }
}

impl Screen for NoData {
    const KIND: ScreenKind = ScreenKind::NoData;

    fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        let Some(code) = self.own.take_action() else {
            return Ok(self.into());
        };
        let Some(action) = NoDataAction::decode(code) else {
            ignore_unknown(Self::KIND, code);
            return Ok(self.into());
        };

        self.own.release(ctx.registry);
        Ok(match action {
            NoDataAction::Create => MakeNewData::enter(ctx, self.selection).into(),
            NoDataAction::Reselect => CharacterSelect::enter(ctx).into(),
        })
    }
}
