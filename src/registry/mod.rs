//! Object registry with deferred display, forget and destroy queues.
//!
//! Routines never touch the surface directly. They register elements and
//! enqueue lifecycle requests; the session drains the three queues once per
//! tick, always in the order display, forget, destroy. A destroy requested
//! in the same tick as a display therefore wins.

pub mod action;
pub mod element;
pub mod surface;

pub use action::{ActionCode, ActionSlot, Binding};
pub use element::{
    Caption, Element, ElementId, ElementState, IdAllocator, IdRange, Position, Widget,
};
pub use surface::{NullSurface, RecordingSurface, Surface, SurfaceEvent, WindowSpec};

use crate::core::Highlight;
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, trace};

/// Counts of what one [`ObjectRegistry::drain`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub displayed: usize,
    pub forgotten: usize,
    pub destroyed: usize,
    /// Queued ids that named no registered element.
    pub dropped: usize,
}

impl DrainReport {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Mapping from element id to element, plus the pending lifecycle queues.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    elements: BTreeMap<ElementId, Element>,
    display_queue: VecDeque<ElementId>,
    forget_queue: VecDeque<ElementId>,
    destroy_queue: VecDeque<ElementId>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element in the `Unloaded` state.
    pub fn insert(&mut self, id: ElementId, position: Position, widget: Widget) {
        trace!(%id, kind = widget.kind(), "registering element");
        self.elements.insert(
            id,
            Element {
                id,
                position,
                widget,
                state: ElementState::Unloaded,
            },
        );
    }

    pub fn queue_display(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        enqueue(&mut self.display_queue, ids);
    }

    pub fn queue_forget(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        enqueue(&mut self.forget_queue, ids);
    }

    pub fn queue_destroy(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        enqueue(&mut self.destroy_queue, ids);
    }

    /// Ids currently waiting in each queue, in display, forget, destroy order.
    pub fn pending(&self) -> (Vec<ElementId>, Vec<ElementId>, Vec<ElementId>) {
        (
            self.display_queue.iter().copied().collect(),
            self.forget_queue.iter().copied().collect(),
            self.destroy_queue.iter().copied().collect(),
        )
    }

    /// Apply every queued request against `surface`.
    ///
    /// Each queue is consumed completely. Ids with no registered element are
    /// dropped, and a display request for an element that is already
    /// displaying is a no-op.
    pub fn drain(&mut self, surface: &mut dyn Surface) -> DrainReport {
        let mut report = DrainReport::default();

        while let Some(id) = self.display_queue.pop_front() {
            match self.elements.get_mut(&id) {
                Some(element) if element.state != ElementState::Displaying => {
                    surface.place(element);
                    element.state = ElementState::Displaying;
                    report.displayed += 1;
                }
                Some(_) => {}
                None => report.dropped += 1,
            }
        }

        while let Some(id) = self.forget_queue.pop_front() {
            match self.elements.get_mut(&id) {
                Some(element) if element.state == ElementState::Displaying => {
                    surface.unplace(element);
                    element.state = ElementState::Hidden;
                    report.forgotten += 1;
                }
                Some(_) => {}
                None => report.dropped += 1,
            }
        }

        while let Some(id) = self.destroy_queue.pop_front() {
            match self.elements.remove(&id) {
                Some(element) => {
                    surface.destroy(&element);
                    report.destroyed += 1;
                }
                None => report.dropped += 1,
            }
        }

        if !report.is_idle() {
            debug!(
                displayed = report.displayed,
                forgotten = report.forgotten,
                destroyed = report.destroyed,
                dropped = report.dropped,
                "drained registry queues"
            );
        }
        report
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn state(&self, id: ElementId) -> Option<ElementState> {
        self.get(id).map(Element::state)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All registered elements in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Elements currently on screen, in id order.
    pub fn displayed(&self) -> impl Iterator<Item = &Element> {
        self.iter().filter(|e| e.is_displaying())
    }

    /// Replace a label's text. Returns `false` for anything but a label.
    pub fn set_text(&mut self, id: ElementId, text: &str) -> bool {
        match self.elements.get_mut(&id).map(|e| &mut e.widget) {
            Some(Widget::Label { text: current }) => {
                if current != text {
                    text.clone_into(current);
                }
                true
            }
            _ => false,
        }
    }

    pub fn set_highlight(&mut self, id: ElementId, highlight: Highlight) -> bool {
        match self.elements.get_mut(&id).map(|e| &mut e.widget) {
            Some(Widget::Button { highlight: current, .. }) => {
                *current = highlight;
                true
            }
            _ => false,
        }
    }

    /// Current value of an entry field.
    pub fn entry_value(&self, id: ElementId) -> Option<&str> {
        match self.get(id).map(Element::widget) {
            Some(Widget::Entry { value }) => Some(value),
            _ => None,
        }
    }

    /// Overwrite an entry's value regardless of its lifecycle state.
    pub fn set_entry_value(&mut self, id: ElementId, text: &str) -> bool {
        match self.elements.get_mut(&id).map(|e| &mut e.widget) {
            Some(Widget::Entry { value }) => {
                text.clone_into(value);
                true
            }
            _ => false,
        }
    }

    /// Operator typing: only entries on screen accept text.
    pub fn type_into(&mut self, id: ElementId, text: &str) -> bool {
        if self.state(id) != Some(ElementState::Displaying) {
            return false;
        }
        self.set_entry_value(id, text)
    }

    /// Operator click: a displaying button writes its code into its slot.
    pub fn press(&mut self, id: ElementId) -> bool {
        match self.get(id) {
            Some(Element {
                state: ElementState::Displaying,
                widget: Widget::Button { binding, .. },
                ..
            }) => {
                binding.fire();
                true
            }
            _ => false,
        }
    }

    /// First registered button whose caption text is `caption`.
    pub fn find_button(&self, caption: &str) -> Option<ElementId> {
        self.iter()
            .find(|e| matches!(&e.widget, Widget::Button { caption: c, .. } if c.text() == caption))
            .map(Element::id)
    }

    /// First label showing `text`.
    pub fn find_label(&self, text: &str) -> Option<ElementId> {
        self.iter()
            .find(|e| matches!(&e.widget, Widget::Label { text: t } if t == text))
            .map(Element::id)
    }

    /// Registered entry fields in id order.
    pub fn entries(&self) -> Vec<ElementId> {
        self.iter()
            .filter(|e| matches!(e.widget, Widget::Entry { .. }))
            .map(Element::id)
            .collect()
    }
}

fn enqueue(queue: &mut VecDeque<ElementId>, ids: impl IntoIterator<Item = ElementId>) {
    for id in ids {
        if !queue.contains(&id) {
            queue.push_back(id);
        }
    }
}
