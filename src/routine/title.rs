//! Title screen: the root menu.

use super::{ignore_unknown, Context, Layout, Owned, Routine, Screen};
use super::{DeleteMode, PlayMode, ReadMode};
use crate::core::ScreenKind;
use crate::session::SessionError;

action_enum! {
    pub enum TitleAction {
        ViewStats = 1,
        Play = 2,
        DeleteStats = 3,
    }
}

#[derive(Debug)]
pub struct Title {
    pub(super) own: Owned,
}

impl Title {
    pub fn enter(ctx: &mut Context<'_>) -> Self {
        let mut layout = Layout::new(ctx);
        layout.label(550, 250, "Choose what to do");
        layout.button(340, 400, "View stats", TitleAction::ViewStats.code());
        layout.button(560, 400, "Play and record", TitleAction::Play.code());
        layout.button(780, 400, "Delete stats", TitleAction::DeleteStats.code());
        Self {
            own: layout.finish(),
        }
    }
}

impl Screen for Title {
    const KIND: ScreenKind = ScreenKind::Title;

    fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        let Some(code) = self.own.take_action() else {
            return Ok(self.into());
        };
        let Some(action) = TitleAction::decode(code) else {
            ignore_unknown(Self::KIND, code);
            return Ok(self.into());
        };

        self.own.release(ctx.registry);
        Ok(match action {
            TitleAction::ViewStats => ReadMode::enter(ctx).into(),
            TitleAction::Play => PlayMode::enter(ctx).into(),
            TitleAction::DeleteStats => DeleteMode::enter(ctx).into(),
        })
    }
}
