//! The running application session.
//!
//! A [`Session`] owns every piece of mutable state: the object registry,
//! the record book, the store, the display surface and the active routine.
//! One call to [`Session::tick`] runs the active routine once and then
//! drains the registry queues against the surface.

pub mod builder;
pub mod config;
pub mod error;
pub mod input;
pub mod scheduler;

pub use builder::SessionBuilder;
pub use config::{AppConfig, Assets, ConfigError, WindowConfig};
pub use error::{BuildError, SessionError};
pub use input::{Gesture, PointerState};
pub use scheduler::{RunSummary, TickScheduler};

use crate::core::{MatchupRecord, NavigationHistory, RecordBook, Roster, ScreenKind, ScreenTransition};
use crate::registry::{
    ActionCode, DrainReport, ElementId, IdAllocator, ObjectRegistry, Surface, WindowSpec,
};
use crate::routine::{Context, Routine};
use crate::store::RecordStore;
use chrono::Utc;
use tracing::{debug, info};

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub from: ScreenKind,
    pub to: ScreenKind,
    pub drain: DrainReport,
}

impl TickReport {
    pub fn changed_screen(&self) -> bool {
        self.from != self.to
    }
}

pub struct Session<S: Surface> {
    config: AppConfig,
    registry: ObjectRegistry,
    ids: IdAllocator,
    roster: Roster,
    book: RecordBook,
    store: Box<dyn RecordStore>,
    surface: S,
    active: Option<Routine>,
    history: NavigationHistory,
    ticks: u64,
    pointer: PointerState,
}

impl<S: Surface> Session<S> {
    pub(crate) fn start(
        config: AppConfig,
        roster: Roster,
        book: RecordBook,
        store: Box<dyn RecordStore>,
        surface: S,
    ) -> Self {
        let history = NavigationHistory::with_capacity(config.history_capacity);
        let mut session = Self {
            config,
            registry: ObjectRegistry::new(),
            ids: IdAllocator::new(),
            roster,
            book,
            store,
            surface,
            active: None,
            history,
            ticks: 0,
            pointer: PointerState::default(),
        };

        session.surface.open(&WindowSpec::from(&session.config.window));
        let title = Routine::start(&mut session.context());
        session.active = Some(title);
        info!(
            competitors = session.roster.len(),
            records = session.book.len(),
            "session started"
        );
        session
    }

    fn context(&mut self) -> Context<'_> {
        Context {
            registry: &mut self.registry,
            ids: &mut self.ids,
            roster: &self.roster,
            book: &mut self.book,
            store: self.store.as_mut(),
            assets: &self.config.assets,
        }
    }

    /// Run the active routine once, then drain the registry queues.
    ///
    /// After an error the session has no active routine and every later
    /// tick fails with [`SessionError::Inactive`].
    pub fn tick(&mut self) -> Result<TickReport, SessionError> {
        let routine = self.active.take().ok_or(SessionError::Inactive)?;
        let from = routine.leaf_kind();
        let next = routine.execute(&mut self.context())?;
        let to = next.leaf_kind();
        self.active = Some(next);
        self.ticks += 1;

        if from != to {
            info!(tick = self.ticks, %from, %to, "screen changed");
            self.history.record(ScreenTransition {
                from,
                to,
                timestamp: Utc::now(),
                tick: self.ticks,
            });
        }

        let drain = self.registry.drain(&mut self.surface);
        self.surface.present(&self.registry);
        Ok(TickReport {
            tick: self.ticks,
            from,
            to,
            drain,
        })
    }

    /// Apply one operator gesture. Returns whether it had any effect.
    pub fn apply_gesture(&mut self, gesture: &Gesture) -> bool {
        match gesture {
            Gesture::Press(id) => self.press(*id),
            Gesture::Type { id, text } => self.type_text(*id, text),
            Gesture::Quit => false,
            pointer => self.pointer.apply(pointer),
        }
    }

    /// Click a button of the active screen.
    pub fn press(&mut self, id: ElementId) -> bool {
        if !self.owns(id) {
            debug!(%id, "press ignored: element not on the active screen");
            return false;
        }
        self.registry.press(id)
    }

    /// Replace the text of an entry on the active screen.
    pub fn type_text(&mut self, id: ElementId, text: &str) -> bool {
        if !self.owns(id) {
            debug!(%id, "typing ignored: element not on the active screen");
            return false;
        }
        self.registry.type_into(id, text)
    }

    /// Write `code` straight into the active screen's action slot.
    pub fn signal(&self, code: ActionCode) -> bool {
        match &self.active {
            Some(routine) => {
                routine.action_slot().signal(code);
                true
            }
            None => false,
        }
    }

    fn owns(&self, id: ElementId) -> bool {
        self.active
            .as_ref()
            .is_some_and(|routine| routine.elements().contains(id))
    }

    /// Displayed button of the active screen with this caption.
    pub fn button(&self, caption: &str) -> Option<ElementId> {
        let owned = self.active.as_ref()?.elements();
        self.registry
            .displayed()
            .filter(|e| owned.contains(e.id()))
            .find(|e| e.widget().kind() == "button" && e.widget().text() == caption)
            .map(|e| e.id())
    }

    /// Entry fields of the active screen in column order, hidden ones included.
    pub fn entries(&self) -> Vec<ElementId> {
        let Some(routine) = &self.active else {
            return Vec::new();
        };
        let owned = routine.elements();
        self.registry
            .entries()
            .into_iter()
            .filter(|id| owned.contains(*id))
            .collect()
    }

    /// Whether a displayed label of the active screen shows `text`.
    pub fn shows_label(&self, text: &str) -> bool {
        self.registry
            .displayed()
            .any(|e| e.widget().kind() == "label" && e.widget().text() == text)
    }

    /// Innermost active screen.
    pub fn screen(&self) -> Option<ScreenKind> {
        self.active.as_ref().map(Routine::leaf_kind)
    }

    /// Active screens from the outermost node down to the leaf.
    pub fn screen_path(&self) -> Vec<ScreenKind> {
        self.active.as_ref().map(Routine::path).unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn records(&self) -> &[MatchupRecord] {
        self.book.records()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
