//! Property-based tests for the pure core.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated selections and outcome sequences.

use arena_stats::core::stats::clamp_page;
use arena_stats::core::{
    display_map, Canonical, MatchupRecord, NavigationHistory, Outcome, RecordBook, Roster,
    ScreenKind, ScreenTransition, Selection, SLOTS,
};
use chrono::Utc;
use proptest::prelude::*;

const NAMES: [&str; 8] = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Grace", "Heidi"];

fn roster() -> Roster {
    NAMES.iter().map(|n| n.to_string()).collect()
}

prop_compose! {
    /// Up to four distinct roster names in arbitrary slots, at least one filled.
    fn arbitrary_selection()(
        picks in prop::array::uniform4(prop::option::of(0..NAMES.len()))
    ) -> Selection {
        let mut slots: [Option<String>; SLOTS] = Default::default();
        for (slot, pick) in picks.iter().enumerate() {
            if let Some(index) = pick {
                let name = NAMES[*index];
                if !slots.iter().any(|s| s.as_deref() == Some(name)) {
                    slots[slot] = Some(name.to_string());
                }
            }
        }
        if slots.iter().all(Option::is_none) {
            slots[0] = Some(NAMES[0].to_string());
        }
        Selection::new(slots)
    }
}

prop_compose! {
    fn shuffled_pair()(selection in arbitrary_selection())(
        shuffled in Just(selection.slots().to_vec()).prop_shuffle(),
        selection in Just(selection),
    ) -> (Selection, Selection) {
        let slots: [Option<String>; SLOTS] = std::array::from_fn(|i| shuffled[i].clone());
        (selection, Selection::new(slots))
    }
}

fn arbitrary_screen() -> impl Strategy<Value = ScreenKind> {
    prop_oneof![
        Just(ScreenKind::Title),
        Just(ScreenKind::ReadMode),
        Just(ScreenKind::CharacterSelect),
        Just(ScreenKind::NoData),
        Just(ScreenKind::MakeNewData),
        Just(ScreenKind::Calculate),
        Just(ScreenKind::DeleteMode),
    ]
}

fn first_record(selection: &Selection, roster: &Roster) -> MatchupRecord {
    let canonical = Canonical::of(selection, roster).unwrap();
    MatchupRecord::first_result(canonical.arrange(selection.slots()), Outcome::Draw, [0.0; SLOTS])
        .unwrap()
}

proptest! {
    #[test]
    fn canonicalization_is_deterministic(selection in arbitrary_selection()) {
        let roster = roster();
        let first = Canonical::of(&selection, &roster).unwrap();
        let second = Canonical::of(&selection, &roster).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn canonicalization_is_idempotent(selection in arbitrary_selection()) {
        let roster = roster();
        let canonical = Canonical::of(&selection, &roster).unwrap();
        let arranged = Selection::new(canonical.arrange(selection.slots()));
        prop_assert!(Canonical::of(&arranged, &roster).unwrap().is_identity());
    }

    #[test]
    fn canonical_order_ignores_pick_order((selection, shuffled) in shuffled_pair()) {
        let roster = roster();
        let a = Canonical::of(&selection, &roster).unwrap().arrange(selection.slots());
        let b = Canonical::of(&shuffled, &roster).unwrap().arrange(shuffled.slots());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn canonical_names_ascend_by_roster_index(selection in arbitrary_selection()) {
        let roster = roster();
        let arranged = Canonical::of(&selection, &roster).unwrap().arrange(selection.slots());
        let filled = arranged.iter().take_while(|s| s.is_some()).count();
        prop_assert!(arranged[filled..].iter().all(Option::is_none));
        let indices: Vec<usize> = arranged[..filled]
            .iter()
            .filter_map(|s| roster.index_of(s.as_deref()?))
            .collect();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn set_match_is_order_independent((selection, shuffled) in shuffled_pair()) {
        let book = RecordBook::new(vec![first_record(&selection, &roster())]);
        prop_assert_eq!(book.find_matching(&selection), Some(0));
        prop_assert_eq!(book.find_matching(&shuffled), Some(0));
    }

    #[test]
    fn display_map_is_a_permutation((selection, shuffled) in shuffled_pair()) {
        let record = first_record(&selection, &roster());
        let mut map = display_map(&record, &shuffled).unwrap().to_vec();
        for (slot, &target) in map.iter().enumerate() {
            if let Some(name) = shuffled.slot(slot) {
                prop_assert_eq!(record.competitor(target), Some(name));
            }
        }
        map.sort_unstable();
        prop_assert_eq!(map, vec![0, 1, 2, 3]);
    }

    #[test]
    fn total_invariant_survives_any_outcome_sequence(
        selection in arbitrary_selection(),
        outcomes in prop::collection::vec(prop::option::of(0..SLOTS), 0..40),
    ) {
        let mut record = first_record(&selection, &roster());
        let mut accepted = 1;
        for outcome in outcomes {
            let outcome = outcome.map_or(Outcome::Draw, Outcome::Win);
            let before = record.clone();
            match record.record_outcome(outcome, [1.0; SLOTS]) {
                Ok(()) => accepted += 1,
                Err(_) => prop_assert_eq!(&record, &before),
            }
            prop_assert!(record.check_invariant().is_ok());
        }
        prop_assert_eq!(record.total(), accepted);
        prop_assert!(record.validate().is_success());
    }

    #[test]
    fn clamp_page_stays_in_range(requested in any::<i64>(), count in 0usize..50) {
        let page = clamp_page(requested, count);
        prop_assert!(page >= 1);
        prop_assert!(page <= count.max(1));
    }

    #[test]
    fn history_path_tracks_retained_transitions(
        screens in prop::collection::vec(arbitrary_screen(), 1..20),
        capacity in 1usize..10,
    ) {
        let mut history = NavigationHistory::with_capacity(capacity);
        for (tick, pair) in screens.windows(2).enumerate() {
            history.record(ScreenTransition {
                from: pair[0],
                to: pair[1],
                timestamp: Utc::now(),
                tick: tick as u64,
            });
        }
        let recorded = screens.len() - 1;
        prop_assert_eq!(history.len(), recorded.min(capacity));
        if recorded > 0 {
            let path = history.path();
            prop_assert_eq!(path.len(), history.len() + 1);
            prop_assert_eq!(path.last(), screens.last());
        }
    }
}
