//! Visual elements tracked by the registry.

use super::action::Binding;
use crate::core::Highlight;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique element handle. Ids increase monotonically and are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out element ids from a single counter.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`allocate`](Self::allocate) returns.
    pub fn peek(&self) -> ElementId {
        ElementId(self.next)
    }
}

/// Contiguous run of ids owned by one routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdRange {
    start: u64,
    end: u64,
}

impl IdRange {
    /// Range from `start` up to, not including, `end`.
    pub fn new(start: ElementId, end: ElementId) -> Self {
        Self {
            start: start.0,
            end: end.0.max(start.0),
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        (self.start..self.end).contains(&id.0)
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> {
        (self.start..self.end).map(ElementId)
    }
}

/// Lifecycle of an element.
///
/// - `{Unloaded, Hidden} --display--> Displaying`
/// - `Displaying --forget--> Hidden`
/// - any state `--destroy-->` removed from the registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementState {
    Unloaded,
    Displaying,
    Hidden,
}

/// Screen coordinates of an element's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What a button shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Caption {
    Text(String),
    /// An image asset, with text used where images cannot be shown.
    Image { path: String, alt: String },
}

impl Caption {
    /// The caption as text: the label itself, or the image's alt text.
    pub fn text(&self) -> &str {
        match self {
            Caption::Text(text) => text,
            Caption::Image { alt, .. } => alt,
        }
    }
}

/// The renderable thing an element is bound to.
#[derive(Clone, Debug)]
pub enum Widget {
    Label {
        text: String,
    },
    Button {
        caption: Caption,
        binding: Binding,
        highlight: Highlight,
    },
    Entry {
        value: String,
    },
}

impl Widget {
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Label { .. } => "label",
            Widget::Button { .. } => "button",
            Widget::Entry { .. } => "entry",
        }
    }

    /// Visible text of the widget.
    pub fn text(&self) -> &str {
        match self {
            Widget::Label { text } => text,
            Widget::Button { caption, .. } => caption.text(),
            Widget::Entry { value } => value,
        }
    }
}

/// A registered visual element.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) position: Position,
    pub(crate) widget: Widget,
    pub(crate) state: ElementState,
}

impl Element {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    pub fn is_displaying(&self) -> bool {
        self.state == ElementState::Displaying
    }
}
