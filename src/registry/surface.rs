//! Display surface port.
//!
//! The registry decides *when* an element is placed, hidden or destroyed;
//! a `Surface` decides what that means on screen.

use super::element::{Element, ElementId};
use super::ObjectRegistry;

/// Window parameters handed to the surface at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

pub trait Surface {
    /// Create the window. Called once before the first tick.
    fn open(&mut self, _window: &WindowSpec) {}

    /// Show `element` at its position.
    fn place(&mut self, element: &Element);

    /// Hide `element` without destroying it.
    fn unplace(&mut self, element: &Element);

    /// Tear `element` down; it is removed from the registry afterwards.
    fn destroy(&mut self, element: &Element);

    /// Called at the end of every tick, after the queues are drained.
    fn present(&mut self, _registry: &ObjectRegistry) {}
}

/// Surface that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn place(&mut self, _element: &Element) {}

    fn unplace(&mut self, _element: &Element) {}

    fn destroy(&mut self, _element: &Element) {}
}

/// One call made on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    Opened(String),
    Placed(ElementId),
    Unplaced(ElementId),
    Destroyed(ElementId),
    Presented,
}

/// Surface that remembers every call, for tests and diagnostics.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn placed(&self, id: ElementId) -> bool {
        self.events.contains(&SurfaceEvent::Placed(id))
    }
}

impl Surface for RecordingSurface {
    fn open(&mut self, window: &WindowSpec) {
        self.events.push(SurfaceEvent::Opened(window.title.clone()));
    }

    fn place(&mut self, element: &Element) {
        self.events.push(SurfaceEvent::Placed(element.id()));
    }

    fn unplace(&mut self, element: &Element) {
        self.events.push(SurfaceEvent::Unplaced(element.id()));
    }

    fn destroy(&mut self, element: &Element) {
        self.events.push(SurfaceEvent::Destroyed(element.id()));
    }

    fn present(&mut self, _registry: &ObjectRegistry) {
        self.events.push(SurfaceEvent::Presented);
    }
}
