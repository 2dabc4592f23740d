//! Entry of the first contest result for a brand-new matchup.

use super::{column_x, ignore_unknown, CharacterSelect, Context, Layout, Owned, ResultAction};
use super::{Routine, Screen};
use crate::core::stats::odds_or_zero;
use crate::core::{Canonical, MatchupRecord, Outcome, ScreenKind, Selection, SLOTS};
use crate::registry::{ElementId, ObjectRegistry};
use crate::session::SessionError;
use tracing::{debug, info};

#[derive(Debug)]
pub struct MakeNewData {
    pub(super) own: Owned,
    selection: Selection,
    entries: [ElementId; SLOTS],
}

impl MakeNewData {
    pub fn enter(ctx: &mut Context<'_>, selection: Selection) -> Self {
        let labels = selection.labels();
        let mut unused = Vec::new();

        let mut layout = Layout::new(ctx);
        layout.button(50, 50, "Back", ResultAction::Back.code());
        layout.label(100, 400, "Odds");
        layout.label(100, 700, "Result");

        let mut entries = [ElementId::new(0); SLOTS];
        for (slot, name) in labels.iter().enumerate() {
            let x = column_x(slot);
            let name_label = layout.label(x, 100, *name);
            entries[slot] = layout.entry(x, 410, "");
            let winner = layout.button(x, 690, *name, ResultAction::Win(slot).code());
            if name.is_empty() {
                unused.extend([name_label, entries[slot], winner]);
            }
        }
        layout.button(1100, 690, "DRAW", ResultAction::Draw.code());
        let own = layout.finish();

        ctx.registry.queue_forget(unused);
        Self {
            own,
            selection,
            entries,
        }
    }

    fn entered_odds(&self, registry: &ObjectRegistry) -> [f64; SLOTS] {
        std::array::from_fn(|slot| odds_or_zero(registry.entry_value(self.entries[slot]).unwrap_or("")))
    }

    fn create(&self, ctx: &mut Context<'_>, result: ResultAction) -> Result<(), SessionError> {
        let canonical = Canonical::of(&self.selection, ctx.roster)?;
        let outcome = match result {
            ResultAction::Win(slot) => Outcome::Win(canonical.position(slot)),
            _ => Outcome::Draw,
        };
        let odds = self.entered_odds(ctx.registry);
        let record = MatchupRecord::first_result(
            canonical.arrange(self.selection.slots()),
            outcome,
            canonical.arrange(&odds),
        )?;

        let index = ctx.book.push(record);
        ctx.persist()?;
        info!(index, ?outcome, "created record");
        Ok(())
    }
}

impl Screen for MakeNewData {
    const KIND: ScreenKind = ScreenKind::MakeNewData;

    fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        let Some(code) = self.own.take_action() else {
            return Ok(self.into());
        };
        match ResultAction::decode(code) {
            None => {
                ignore_unknown(Self::KIND, code);
                return Ok(self.into());
            }
            Some(ResultAction::Win(slot)) if self.selection.slot(slot).is_none() => {
                debug!(slot, "win ignored: slot has no competitor");
                return Ok(self.into());
            }
            Some(ResultAction::Back) => {}
            Some(result) => self.create(ctx, result)?,
        }

        self.own.release(ctx.registry);
        Ok(CharacterSelect::enter(ctx).into())
    }
}
