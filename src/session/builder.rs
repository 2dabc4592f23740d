//! Builder for wiring a session together.

use super::config::AppConfig;
use super::error::BuildError;
use super::Session;
use crate::core::{RecordBook, Roster};
use crate::registry::Surface;
use crate::store::{RecordStore, RosterSource};
use tracing::warn;

/// Builder for constructing sessions with a fluent API.
///
/// # Example
///
/// ```rust
/// use arena_stats::core::Roster;
/// use arena_stats::registry::NullSurface;
/// use arena_stats::session::SessionBuilder;
/// use arena_stats::store::InMemoryStore;
///
/// let session = SessionBuilder::new()
///     .roster(Roster::new(vec!["Alice".into(), "Bob".into()]))
///     .store(InMemoryStore::default())
///     .surface(NullSurface)
///     .build()
///     .unwrap();
///
/// assert_eq!(session.screen_path().len(), 1);
/// ```
pub struct SessionBuilder<S: Surface> {
    config: AppConfig,
    roster: Option<Roster>,
    store: Option<Box<dyn RecordStore>>,
    surface: Option<S>,
}

impl<S: Surface> SessionBuilder<S> {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            roster: None,
            store: None,
            surface: None,
        }
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the roster directly.
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Load the roster from a source.
    /// Returns an error if the source cannot be read.
    pub fn roster_from(mut self, source: &mut dyn RosterSource) -> Result<Self, BuildError> {
        self.roster = Some(source.load_roster()?);
        Ok(self)
    }

    pub fn store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Load the records and start the session on the Title screen.
    /// Returns an error if required pieces are missing or loading fails.
    pub fn build(self) -> Result<Session<S>, BuildError> {
        let roster = self.roster.ok_or(BuildError::MissingRoster)?;
        if roster.is_empty() {
            return Err(BuildError::EmptyRoster);
        }
        let mut store = self.store.ok_or(BuildError::MissingStore)?;
        let surface = self.surface.ok_or(BuildError::MissingSurface)?;

        let records = store.load()?;
        for (index, record) in records.iter().enumerate() {
            for name in record.names().filter(|name| !roster.contains(name)) {
                warn!(record = index, %name, "record names a competitor missing from the roster");
            }
        }

        Ok(Session::start(
            self.config,
            roster,
            RecordBook::new(records),
            store,
            surface,
        ))
    }
}

impl<S: Surface> Default for SessionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScreenKind;
    use crate::registry::{NullSurface, RecordingSurface, SurfaceEvent};
    use crate::store::{InMemoryStore, StoreError};

    fn roster() -> Roster {
        Roster::new(vec!["Alice".into(), "Bob".into()])
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = SessionBuilder::<NullSurface>::new().build();
        assert!(matches!(result, Err(BuildError::MissingRoster)));

        let result = SessionBuilder::<NullSurface>::new().roster(roster()).build();
        assert!(matches!(result, Err(BuildError::MissingStore)));

        let result = SessionBuilder::<NullSurface>::new()
            .roster(roster())
            .store(InMemoryStore::default())
            .build();
        assert!(matches!(result, Err(BuildError::MissingSurface)));
    }

    #[test]
    fn builder_rejects_empty_roster() {
        let result = SessionBuilder::new()
            .roster(Roster::default())
            .store(InMemoryStore::default())
            .surface(NullSurface)
            .build();
        assert!(matches!(result, Err(BuildError::EmptyRoster)));
    }

    #[test]
    fn load_failure_is_reported() {
        let store = InMemoryStore::default();
        store.fail();
        let result = SessionBuilder::new()
            .roster(roster())
            .store(store)
            .surface(NullSurface)
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Store(StoreError::Unavailable(_)))
        ));
    }

    #[test]
    fn fluent_api_builds_session_on_title() {
        let session = SessionBuilder::new()
            .roster_from(&mut roster())
            .unwrap()
            .store(InMemoryStore::default())
            .surface(RecordingSurface::new())
            .build()
            .unwrap();

        assert_eq!(session.screen(), Some(ScreenKind::Title));
        assert_eq!(
            session.surface().events(),
            &[SurfaceEvent::Opened("Casino Arena Statistics".into())]
        );
    }
}
