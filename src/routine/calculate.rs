//! Statistics and result entry for an existing matchup.
//!
//! Columns follow the operator's selection order while counters live in
//! the record's canonical order; `map[i]` is the record slot shown in
//! display column `i`. Return-rate labels are recomputed every tick from
//! whatever odds are currently typed.

use super::{column_x, ignore_unknown, CharacterSelect, Context, Layout, Owned, ResultAction};
use super::{Routine, Screen};
use crate::core::stats::{format_odds, format_percent, format_percent_value, odds_or_zero, parse_odds};
use crate::core::{display_map, Outcome, ScreenKind, Selection, SLOTS};
use crate::registry::ElementId;
use crate::session::SessionError;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Calculate {
    pub(super) own: Owned,
    selection: Selection,
    record: usize,
    map: [usize; SLOTS],
    entries: [ElementId; SLOTS],
    returns: [ElementId; SLOTS],
}

impl Calculate {
    pub fn enter(
        ctx: &mut Context<'_>,
        record: usize,
        selection: Selection,
    ) -> Result<Self, SessionError> {
        let stored = ctx
            .book
            .get(record)
            .ok_or(SessionError::MissingRecord { index: record })?;
        let map = display_map(stored, &selection)?;
        let win_rates: [String; SLOTS] =
            std::array::from_fn(|slot| format_percent(stored.win_rate(map[slot])));
        let odds: [String; SLOTS] = std::array::from_fn(|slot| format_odds(stored.odds()[map[slot]]));

        let labels = selection.labels();
        let mut unused = Vec::new();
        let mut entries = [ElementId::new(0); SLOTS];
        let mut returns = [ElementId::new(0); SLOTS];

        let mut layout = Layout::new(ctx);
        layout.button(50, 50, "Back", ResultAction::Back.code());
        layout.label(100, 250, "Win rate");
        layout.label(100, 400, "Odds");
        layout.label(100, 550, "Return rate");
        layout.label(100, 700, "Result");
        for (slot, name) in labels.iter().enumerate() {
            let x = column_x(slot);
            let column = [
                layout.label(x, 100, *name),
                layout.label(x, 250, win_rates[slot].as_str()),
                layout.entry(x, 410, odds[slot].as_str()),
                layout.label(x, 550, ""),
                layout.button(x, 690, *name, ResultAction::Win(slot).code()),
            ];
            entries[slot] = column[2];
            returns[slot] = column[3];
            if name.is_empty() {
                unused.extend(column);
            }
        }
        layout.button(1100, 690, "DRAW", ResultAction::Draw.code());
        let own = layout.finish();
        ctx.registry.queue_forget(unused);

        Ok(Self {
            own,
            selection,
            record,
            map,
            entries,
            returns,
        })
    }

    /// Index of the record being updated.
    pub fn record(&self) -> usize {
        self.record
    }

    fn refresh(&self, ctx: &mut Context<'_>) -> Result<(), SessionError> {
        let stored = ctx
            .book
            .get(self.record)
            .ok_or(SessionError::MissingRecord { index: self.record })?;
        for slot in 0..SLOTS {
            let text = if self.selection.slot(slot).is_some() {
                let typed = ctx.registry.entry_value(self.entries[slot]).unwrap_or("");
                format_percent_value(parse_odds(typed).and_then(|odds| stored.return_rate(self.map[slot], odds)))
            } else {
                String::new()
            };
            ctx.registry.set_text(self.returns[slot], &text);
        }
        Ok(())
    }

    fn apply(&self, ctx: &mut Context<'_>, result: ResultAction) -> Result<(), SessionError> {
        let typed: [f64; SLOTS] = std::array::from_fn(|slot| {
            odds_or_zero(ctx.registry.entry_value(self.entries[slot]).unwrap_or(""))
        });
        let outcome = match result {
            ResultAction::Win(slot) => Outcome::Win(self.map[slot]),
            _ => Outcome::Draw,
        };

        let stored = ctx
            .book
            .get_mut(self.record)
            .ok_or(SessionError::MissingRecord { index: self.record })?;
        let mut odds = *stored.odds();
        for (slot, value) in typed.into_iter().enumerate() {
            odds[self.map[slot]] = value;
        }
        stored.record_outcome(outcome, odds)?;
        let total = stored.total();

        ctx.persist()?;
        info!(record = self.record, ?outcome, total, "recorded result");
        Ok(())
    }
}

impl Screen for Calculate {
    const KIND: ScreenKind = ScreenKind::Calculate;

    fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        self.refresh(ctx)?;

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
            Some(result) => self.apply(ctx, result)?,
        }

        self.own.release(ctx.registry);
        Ok(CharacterSelect::enter(ctx).into())
    }
}
