//! Competitor picker.
//!
//! The operator fills up to four slots from the roster. Roster buttons are
//! highlighted when already selected, or when they have faced every
//! selected competitor in some stored record. Confirming looks for a record
//! with exactly the selected set of competitors.

use super::{ignore_unknown, Calculate, Context, Layout, NoData, Owned, Routine};
use super::{Screen, Title};
use crate::core::stats::highlights;
use crate::core::{ScreenKind, Selection, SLOTS};
use crate::registry::{ActionCode, ElementId};
use crate::session::SessionError;
use tracing::{debug, info};

/// Decoded CharacterSelect action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectAction {
    Back,
    RemoveLast,
    Confirm,
    /// Pick the roster entry at this index.
    Pick(usize),
}

impl SelectAction {
    const PICK_BASE: u32 = 4;

    pub fn decode(code: ActionCode, roster_len: usize) -> Option<Self> {
        match code.get() {
            1 => Some(Self::Back),
            2 => Some(Self::RemoveLast),
            3 => Some(Self::Confirm),
            n => {
                let index = usize::try_from(n.checked_sub(Self::PICK_BASE)?).ok()?;
                (index < roster_len).then_some(Self::Pick(index))
            }
        }
    }

    pub fn code(self) -> ActionCode {
        ActionCode::new(match self {
            Self::Back => 1,
            Self::RemoveLast => 2,
            Self::Confirm => 3,
            Self::Pick(index) => {
                Self::PICK_BASE.saturating_add(u32::try_from(index).unwrap_or(u32::MAX))
            }
        })
    }
}

#[derive(Debug)]
pub struct CharacterSelect {
    pub(super) own: Owned,
    roster_buttons: Vec<ElementId>,
    slot_labels: [ElementId; SLOTS],
    selection: Selection,
}

impl CharacterSelect {
    pub fn enter(ctx: &mut Context<'_>) -> Self {
        let roster = ctx.roster;
        let assets = ctx.assets;

        let mut layout = Layout::new(ctx);
        layout.button(50, 50, "Back", SelectAction::Back.code());
        layout.image_button(
            900,
            50,
            &assets.remove_image,
            "DEL",
            SelectAction::RemoveLast.code(),
        );
        layout.image_button(
            1100,
            50,
            &assets.confirm_image,
            "ENTER",
            SelectAction::Confirm.code(),
        );
        layout.label(400, 80, "Select the competitors");
        let slot_labels = std::array::from_fn(|slot| layout.label(150 + 170 * slot as i32, 120, ""));
        let roster_buttons = roster
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let x = 50 + 122 * (index % 10) as i32;
                let y = 200 + 47 * (index / 10) as i32;
                layout.button(x, y, name, SelectAction::Pick(index).code())
            })
            .collect();

        Self {
            own: layout.finish(),
            roster_buttons,
            slot_labels,
            selection: Selection::default(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn refresh(&self, ctx: &mut Context<'_>) {
        for (slot, text) in self.selection.labels().iter().enumerate() {
            ctx.registry.set_text(self.slot_labels[slot], text);
        }
        let marks = highlights(ctx.roster, &self.selection, ctx.book);
        for (&id, mark) in self.roster_buttons.iter().zip(marks) {
            ctx.registry.set_highlight(id, mark);
        }
    }

    fn confirm(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        self.own.release(ctx.registry);
        match ctx.book.find_matching(&self.selection) {
            Some(index) => {
                debug!(index, "selection matches an existing record");
                Ok(Calculate::enter(ctx, index, self.selection)?.into())
            }
            None => Ok(NoData::enter(ctx, self.selection).into()),
        }
    }
}

impl Screen for CharacterSelect {
    const KIND: ScreenKind = ScreenKind::CharacterSelect;

    fn execute(mut self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
        if let Some(code) = self.own.take_action() {
            match SelectAction::decode(code, ctx.roster.len()) {
                Some(SelectAction::Back) => {
                    self.own.release(ctx.registry);
                    return Ok(Title::enter(ctx).into());
                }
                Some(SelectAction::RemoveLast) => {
                    if let Some(name) = self.selection.remove_last() {
                        debug!(%name, "removed from selection");
                    }
                }
                Some(SelectAction::Pick(index)) => {
                    if let Some(name) = ctx.roster.name(index) {
                        if !self.selection.pick(name) {
                            debug!(%name, "pick ignored: already selected or no free slot");
                        }
                    }
                }
                Some(SelectAction::Confirm) if self.selection.is_empty() => {
                    debug!("confirm ignored: nothing selected");
                }
                Some(SelectAction::Confirm) => {
                    info!(selection = ?self.selection.labels(), "selection confirmed");
                    return self.confirm(ctx);
                }
                None => ignore_unknown(Self::KIND, code),
            }
        }

        self.refresh(ctx);
        Ok(self.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Highlight, MatchupRecord, Outcome};
    use crate::routine::testing::Fixture;

    const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

    fn enter(fx: &mut Fixture) -> Routine {
        let routine = CharacterSelect::enter(&mut fx.ctx()).into();
        fx.settle();
        routine
    }

    fn selection_of(routine: &Routine) -> Selection {
        match routine {
            Routine::CharacterSelect(select) => select.selection().clone(),
            other => panic!("expected CharacterSelect, got {:?}", other.kind()),
        }
    }

    #[test]
    fn action_codes_decode_against_roster_size() {
        assert_eq!(SelectAction::decode(ActionCode::new(4), 2), Some(SelectAction::Pick(0)));
        assert_eq!(SelectAction::decode(ActionCode::new(5), 2), Some(SelectAction::Pick(1)));
        assert_eq!(SelectAction::decode(ActionCode::new(6), 2), None);
        assert_eq!(SelectAction::decode(ActionCode::new(0), 2), None);
        assert_eq!(SelectAction::Pick(3).code(), ActionCode::new(7));
    }

    #[test]
    fn picks_fill_slots_and_ignore_duplicates() {
        let mut fx = Fixture::new(&NAMES, vec![]);
        let mut routine = enter(&mut fx);

        for name in ["Carol", "Alice", "Carol"] {
            fx.press(name);
            routine = fx.tick(routine);
        }
        assert_eq!(selection_of(&routine).labels(), ["Carol", "Alice", "", ""]);
        assert!(fx.shows_label("Carol"));
    }

    #[test]
    fn remove_clears_last_pick() {
        let mut fx = Fixture::new(&NAMES, vec![]);
        let mut routine = enter(&mut fx);

        fx.press("Alice");
        routine = fx.tick(routine);
        fx.press("Bob");
        routine = fx.tick(routine);
        fx.press("DEL");
        routine = fx.tick(routine);

        assert_eq!(selection_of(&routine).labels(), ["Alice", "", "", ""]);
    }

    #[test]
    fn empty_confirm_is_ignored() {
        let mut fx = Fixture::new(&NAMES, vec![]);
        let routine = enter(&mut fx);
        fx.press("ENTER");
        let routine = fx.tick(routine);
        assert_eq!(routine.kind(), ScreenKind::CharacterSelect);
    }

    #[test]
    fn confirm_without_record_goes_to_no_data() {
        let mut fx = Fixture::new(&NAMES, vec![]);
        let mut routine = enter(&mut fx);
        fx.press("Alice");
        routine = fx.tick(routine);
        fx.press("ENTER");
        routine = fx.tick(routine);
        assert_eq!(routine.kind(), ScreenKind::NoData);
    }

    #[test]
    fn confirm_with_matching_record_goes_to_calculate() {
        let record = MatchupRecord::first_result(
            [Some("Alice".into()), Some("Bob".into()), None, None],
            Outcome::Win(0),
            [1.5, 2.0, 0.0, 0.0],
        )
        .unwrap();
        let mut fx = Fixture::new(&NAMES, vec![record]);
        let mut routine = enter(&mut fx);

        for caption in ["Bob", "Alice", "ENTER"] {
            fx.press(caption);
            routine = fx.tick(routine);
        }
        assert_eq!(routine.kind(), ScreenKind::Calculate);
    }

    #[test]
    fn roster_buttons_are_highlighted() {
        let record = MatchupRecord::first_result(
            [Some("Alice".into()), Some("Dave".into()), None, None],
            Outcome::Draw,
            [0.0; 4],
        )
        .unwrap();
        let mut fx = Fixture::new(&NAMES, vec![record]);
        let mut routine = enter(&mut fx);

        fx.press("Alice");
        routine = fx.tick(routine);
        let _ = routine;

        let highlight_of = |fx: &Fixture, name: &str| {
            let id = fx.registry.find_button(name).unwrap();
            match fx.registry.get(id).unwrap().widget() {
                crate::registry::Widget::Button { highlight, .. } => *highlight,
                _ => unreachable!(),
            }
        };
        assert_eq!(highlight_of(&fx, "Alice"), Highlight::Selected);
        assert_eq!(highlight_of(&fx, "Dave"), Highlight::Suggested);
        assert_eq!(highlight_of(&fx, "Bob"), Highlight::Neutral);
    }
}
