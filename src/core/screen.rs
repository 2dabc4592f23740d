//! Screen kinds of the routine tree.
//!
//! A `ScreenKind` names a node of the routine hierarchy without carrying any
//! of its state. It is what the navigation history records and what callers
//! inspect to learn where the session currently is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of the fixed routine topology.
///
/// ```text
/// Title
/// ├── ReadMode
/// ├── PlayMode
/// │   ├── CharacterSelect
/// │   ├── NoData
/// │   ├── MakeNewData
/// │   └── Calculate
/// └── DeleteMode
/// ```
///
/// # Example
///
/// ```rust
/// use arena_stats::core::ScreenKind;
///
/// assert_eq!(ScreenKind::Calculate.parent(), Some(ScreenKind::PlayMode));
/// assert_eq!(ScreenKind::ReadMode.parent(), None);
/// assert_eq!(ScreenKind::NoData.name(), "NoData");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ScreenKind {
    Title,
    ReadMode,
    PlayMode,
    CharacterSelect,
    NoData,
    MakeNewData,
    Calculate,
    DeleteMode,
}

impl ScreenKind {
    /// Get the screen's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::ReadMode => "ReadMode",
            Self::PlayMode => "PlayMode",
            Self::CharacterSelect => "CharacterSelect",
            Self::NoData => "NoData",
            Self::MakeNewData => "MakeNewData",
            Self::Calculate => "Calculate",
            Self::DeleteMode => "DeleteMode",
        }
    }

    /// The composite screen this one is nested in, if any.
    pub fn parent(&self) -> Option<ScreenKind> {
        if self.is_play_child() {
            Some(Self::PlayMode)
        } else {
            None
        }
    }

    /// Check if this screen only ever runs inside the PlayMode frame.
    pub fn is_play_child(&self) -> bool {
        matches!(
            self,
            Self::CharacterSelect | Self::NoData | Self::MakeNewData | Self::Calculate
        )
    }

    /// Path from the root of the routine tree down to this screen.
    ///
    /// Title is the root of every other top-level screen in the topology,
    /// but it is replaced rather than nested, so it never appears as a prefix.
    pub fn path(&self) -> Vec<ScreenKind> {
        match self.parent() {
            Some(parent) => vec![parent, *self],
            None => vec![*self],
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_name_returns_correct_value() {
        assert_eq!(ScreenKind::Title.name(), "Title");
        assert_eq!(ScreenKind::ReadMode.name(), "ReadMode");
        assert_eq!(ScreenKind::CharacterSelect.name(), "CharacterSelect");
        assert_eq!(ScreenKind::DeleteMode.name(), "DeleteMode");
    }

    #[test]
    fn play_children_nest_under_play_mode() {
        for kind in [
            ScreenKind::CharacterSelect,
            ScreenKind::NoData,
            ScreenKind::MakeNewData,
            ScreenKind::Calculate,
        ] {
            assert!(kind.is_play_child());
            assert_eq!(kind.parent(), Some(ScreenKind::PlayMode));
            assert_eq!(kind.path(), vec![ScreenKind::PlayMode, kind]);
        }
    }

    #[test]
    fn top_level_screens_have_no_parent() {
        for kind in [
            ScreenKind::Title,
            ScreenKind::ReadMode,
            ScreenKind::PlayMode,
            ScreenKind::DeleteMode,
        ] {
            assert!(!kind.is_play_child());
            assert_eq!(kind.parent(), None);
            assert_eq!(kind.path(), vec![kind]);
        }
    }

    #[test]
    fn screen_serializes_correctly() {
        let kind = ScreenKind::MakeNewData;
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"MakeNewData\"");
        let deserialized: ScreenKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, deserialized);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(ScreenKind::Calculate.to_string(), "Calculate");
    }
}
