//! Screen routines.
//!
//! A routine is one node of the screen tree. On every tick the session
//! calls [`Routine::execute`], which returns the routine that should be
//! active afterwards: the same one, possibly with updated state, or a
//! freshly entered successor.
//!
//! Every leaf routine registers its elements on entry, queues them for
//! display, and queues all of them for destruction when it hands over to a
//! successor. A pressed button writes its action code into the routine's
//! [`ActionSlot`]; `execute` takes at most one code per tick.

#[macro_use]
mod macros;

pub mod calculate;
pub mod character_select;
pub mod delete_mode;
pub mod make_new_data;
pub mod no_data;
pub mod play_mode;
pub mod read_mode;
pub mod title;

pub use calculate::Calculate;
pub use character_select::CharacterSelect;
pub use delete_mode::DeleteMode;
pub use make_new_data::MakeNewData;
pub use no_data::NoData;
pub use play_mode::PlayMode;
pub use read_mode::ReadMode;
pub use title::Title;

use crate::core::{RecordBook, Roster, ScreenKind, SLOTS};
use crate::registry::{
    ActionCode, ActionSlot, Binding, Caption, ElementId, IdAllocator, IdRange, ObjectRegistry,
    Position, Widget,
};
use crate::session::config::Assets;
use crate::session::SessionError;
use crate::store::RecordStore;
use tracing::debug;

/// Everything a routine may read or mutate while executing.
pub struct Context<'a> {
    pub registry: &'a mut ObjectRegistry,
    pub ids: &'a mut IdAllocator,
    pub roster: &'a Roster,
    pub book: &'a mut RecordBook,
    pub store: &'a mut dyn RecordStore,
    pub assets: &'a Assets,
}

impl Context<'_> {
    /// Write the whole record book back to the store.
    pub fn persist(&mut self) -> Result<(), SessionError> {
        self.store.save(self.book.records())?;
        debug!(records = self.book.len(), "record book saved");
        Ok(())
    }
}

/// Behavior shared by every routine node.
pub trait Screen: Sized {
    const KIND: ScreenKind;

    /// Run one tick and return the routine active afterwards.
    fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError>;
}

/// The active node of the screen tree.
#[derive(Debug)]
pub enum Routine {
    Title(Title),
    ReadMode(ReadMode),
    PlayMode(PlayMode),
    CharacterSelect(CharacterSelect),
    NoData(NoData),
    MakeNewData(MakeNewData),
    Calculate(Calculate),
    DeleteMode(DeleteMode),
}

macro_rules! routine_variants {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Routine {
                fn from(routine: $variant) -> Self {
                    Routine::$variant(routine)
                }
            }
        )*

        impl Routine {
            /// Run one tick of whichever routine is active.
            pub fn execute(self, ctx: &mut Context<'_>) -> Result<Routine, SessionError> {
                match self {
                    $(Routine::$variant(routine) => routine.execute(ctx),)*
                }
            }

            /// Kind of this node, without descending into children.
            pub fn kind(&self) -> ScreenKind {
                match self {
                    $(Routine::$variant(_) => <$variant as Screen>::KIND,)*
                }
            }
        }
    };
}

routine_variants!(
    Title,
    ReadMode,
    PlayMode,
    CharacterSelect,
    NoData,
    MakeNewData,
    Calculate,
    DeleteMode,
);

impl Routine {
    /// The routine a fresh session starts in.
    pub fn start(ctx: &mut Context<'_>) -> Routine {
        Title::enter(ctx).into()
    }

    /// Kind of the innermost active routine.
    pub fn leaf_kind(&self) -> ScreenKind {
        match self {
            Routine::PlayMode(play) => play.child().leaf_kind(),
            other => other.kind(),
        }
    }

    /// Kinds from the outermost node down to the active leaf.
    pub fn path(&self) -> Vec<ScreenKind> {
        match self {
            Routine::PlayMode(play) => {
                let mut path = vec![ScreenKind::PlayMode];
                path.extend(play.child().path());
                path
            }
            other => vec![other.kind()],
        }
    }

    fn owned(&self) -> &Owned {
        match self {
            Routine::Title(r) => &r.own,
            Routine::ReadMode(r) => &r.own,
            Routine::PlayMode(r) => r.child().owned(),
            Routine::CharacterSelect(r) => &r.own,
            Routine::NoData(r) => &r.own,
            Routine::MakeNewData(r) => &r.own,
            Routine::Calculate(r) => &r.own,
            Routine::DeleteMode(r) => &r.own,
        }
    }

    /// Action slot of the innermost active routine.
    pub fn action_slot(&self) -> &ActionSlot {
        &self.owned().slot
    }

    /// Element ids owned by the innermost active routine.
    pub fn elements(&self) -> IdRange {
        self.owned().ids
    }
}

/// The slot and element ids a leaf routine owns.
#[derive(Debug)]
pub(crate) struct Owned {
    slot: ActionSlot,
    ids: IdRange,
}

impl Owned {
    pub(crate) fn take_action(&self) -> Option<ActionCode> {
        self.slot.take()
    }

    /// Queue every owned element for destruction.
    pub(crate) fn release(&self, registry: &mut ObjectRegistry) {
        registry.queue_destroy(self.ids.iter());
    }
}

/// Registers a routine's elements and binds its buttons to one slot.
///
/// Ids handed out between [`Layout::new`] and [`Layout::finish`] are
/// contiguous, so the finished routine owns a single [`IdRange`].
pub(crate) struct Layout<'c, 'a> {
    ctx: &'c mut Context<'a>,
    slot: ActionSlot,
    start: ElementId,
}

impl<'c, 'a> Layout<'c, 'a> {
    pub(crate) fn new(ctx: &'c mut Context<'a>) -> Self {
        let start = ctx.ids.peek();
        Self {
            ctx,
            slot: ActionSlot::new(),
            start,
        }
    }

    fn add(&mut self, x: i32, y: i32, widget: Widget) -> ElementId {
        let id = self.ctx.ids.allocate();
        self.ctx.registry.insert(id, Position::new(x, y), widget);
        id
    }

    pub(crate) fn label(&mut self, x: i32, y: i32, text: impl Into<String>) -> ElementId {
        self.add(x, y, Widget::Label { text: text.into() })
    }

    pub(crate) fn button(
        &mut self,
        x: i32,
        y: i32,
        caption: impl Into<String>,
        code: ActionCode,
    ) -> ElementId {
        self.captioned(x, y, Caption::Text(caption.into()), code)
    }

    pub(crate) fn image_button(
        &mut self,
        x: i32,
        y: i32,
        path: &str,
        alt: &str,
        code: ActionCode,
    ) -> ElementId {
        let caption = Caption::Image {
            path: path.to_string(),
            alt: alt.to_string(),
        };
        self.captioned(x, y, caption, code)
    }

    fn captioned(&mut self, x: i32, y: i32, caption: Caption, code: ActionCode) -> ElementId {
        let binding = Binding::new(&self.slot, code);
        self.add(
            x,
            y,
            Widget::Button {
                caption,
                binding,
                highlight: Default::default(),
            },
        )
    }

    pub(crate) fn entry(&mut self, x: i32, y: i32, value: impl Into<String>) -> ElementId {
        self.add(
            x,
            y,
            Widget::Entry {
                value: value.into(),
            },
        )
    }

    /// Queue everything registered so far for display.
    pub(crate) fn finish(self) -> Owned {
        let ids = IdRange::new(self.start, self.ctx.ids.peek());
        self.ctx.registry.queue_display(ids.iter());
        Owned {
            slot: self.slot,
            ids,
        }
    }
}

/// Decoded action of the result-entry screens.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResultAction {
    Back,
    /// The competitor in this display slot won.
    Win(usize),
    Draw,
}

impl ResultAction {
    const WIN_BASE: u32 = 2;
    const DRAW: u32 = Self::WIN_BASE + SLOTS as u32;

    pub fn decode(code: ActionCode) -> Option<Self> {
        match code.get() {
            1 => Some(Self::Back),
            Self::DRAW => Some(Self::Draw),
            n if (Self::WIN_BASE..Self::DRAW).contains(&n) => {
                Some(Self::Win((n - Self::WIN_BASE) as usize))
            }
            _ => None,
        }
    }

    pub fn code(self) -> ActionCode {
        ActionCode::new(match self {
            Self::Back => 1,
            Self::Win(slot) => Self::WIN_BASE + slot.min(SLOTS - 1) as u32,
            Self::Draw => Self::DRAW,
        })
    }
}

/// Log and drop an action code the active screen does not understand.
pub(crate) fn ignore_unknown(screen: ScreenKind, code: ActionCode) {
    debug!(screen = %screen, %code, "ignoring unknown action code");
}

/// Horizontal offset of competitor column `slot` on the play screens.
pub(crate) fn column_x(slot: usize) -> i32 {
    300 + 200 * slot as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_actions_decode() {
        assert_eq!(ResultAction::decode(ActionCode::new(1)), Some(ResultAction::Back));
        assert_eq!(ResultAction::decode(ActionCode::new(2)), Some(ResultAction::Win(0)));
        assert_eq!(ResultAction::decode(ActionCode::new(5)), Some(ResultAction::Win(3)));
        assert_eq!(ResultAction::decode(ActionCode::new(6)), Some(ResultAction::Draw));
        assert_eq!(ResultAction::decode(ActionCode::new(7)), None);
        assert_eq!(ResultAction::Win(2).code(), ActionCode::new(4));
    }
}
