//! Operator selections and their canonical slot order.
//!
//! Records store competitors in a canonical order so that the same matchup
//! is found no matter in which order the operator picked the names. Real
//! competitors sort by roster index; empty slots sort after every real
//! competitor, keeping their left-to-right order among themselves.

use super::record::{Competitors, MatchupRecord, SLOTS};
use super::roster::Roster;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("competitor '{name}' is not on the roster")]
    UnknownCompetitor { name: String },

    #[error("competitor '{name}' is not part of the record")]
    NotInRecord { name: String },

    #[error("selection has more empty slots than the record")]
    NoFreeSlot,
}

/// Four ordered selection slots as filled by the operator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    slots: Competitors,
}

impl Selection {
    pub fn new(slots: Competitors) -> Self {
        Self { slots }
    }

    /// Fill the first empty slot with `name`.
    ///
    /// Returns `false` and leaves the selection alone when every slot is
    /// taken or `name` is already selected.
    pub fn pick(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(name.to_string());
                true
            }
            None => false,
        }
    }

    /// Clear the last filled slot, returning the name it held.
    pub fn remove_last(&mut self) -> Option<String> {
        self.slots.iter_mut().rev().find(|slot| slot.is_some())?.take()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index)?.as_deref()
    }

    pub fn slots(&self) -> &Competitors {
        &self.slots
    }

    /// Selected names in slot order, empties skipped.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|s| s.as_deref())
    }

    /// The order-independent set of selected names.
    pub fn name_set(&self) -> BTreeSet<&str> {
        self.names().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Slots as display strings, empties rendered as `""`.
    pub fn labels(&self) -> [&str; SLOTS] {
        std::array::from_fn(|i| self.slots[i].as_deref().unwrap_or(""))
    }
}

/// Sort key of one selection slot.
///
/// The derived ordering places every `Listed` key before every `Empty` key,
/// so empty slots never collide with roster indices however long the
/// roster grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    /// A competitor at this roster index.
    Listed(usize),
    /// The n-th empty slot, counted left to right.
    Empty(usize),
}

/// Permutation from selection order to canonical order.
///
/// # Example
///
/// ```rust
/// use arena_stats::core::{Canonical, Roster, Selection};
///
/// let roster: Roster = ["Alice", "Bob", "Carol"].map(String::from).into_iter().collect();
/// let selection = Selection::new([Some("Carol".into()), None, Some("Alice".into()), None]);
///
/// let canonical = Canonical::of(&selection, &roster).unwrap();
/// assert_eq!(
///     canonical.arrange(selection.slots()),
///     [Some("Alice".into()), Some("Carol".into()), None, None]
/// );
/// assert_eq!(canonical.position(0), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canonical {
    /// `order[k]` is the selection slot that lands in canonical slot `k`.
    order: [usize; SLOTS],
    /// `position[i]` is the canonical slot of selection slot `i`.
    position: [usize; SLOTS],
}

impl Canonical {
    pub fn of(selection: &Selection, roster: &Roster) -> Result<Self, CanonicalError> {
        let keys = sort_keys(selection, roster)?;

        let mut order: [usize; SLOTS] = std::array::from_fn(|i| i);
        order.sort_by_key(|&slot| keys[slot]);

        let mut position = [0; SLOTS];
        for (canonical_slot, &slot) in order.iter().enumerate() {
            position[slot] = canonical_slot;
        }

        Ok(Self { order, position })
    }

    /// Canonical slot of selection slot `slot`.
    pub fn position(&self, slot: usize) -> usize {
        self.position[slot]
    }

    /// Reorder per-slot values from selection order into canonical order.
    pub fn arrange<T: Clone>(&self, values: &[T; SLOTS]) -> [T; SLOTS] {
        std::array::from_fn(|k| values[self.order[k]].clone())
    }

    pub fn is_identity(&self) -> bool {
        self.order.iter().enumerate().all(|(k, &slot)| k == slot)
    }
}

/// Record slot shown in each display slot when `selection` is laid out
/// over `record`.
///
/// Named slots map to the first unclaimed record slot holding that name.
/// Empty display slots take the remaining record slots left to right,
/// empty record slots first, so the result is a permutation of `0..SLOTS`
/// even for records that name a competitor twice.
pub fn display_map(
    record: &MatchupRecord,
    selection: &Selection,
) -> Result<[usize; SLOTS], CanonicalError> {
    let mut claimed = [false; SLOTS];
    let mut map = [0; SLOTS];
    for (slot, entry) in selection.slots().iter().enumerate() {
        if let Some(name) = entry {
            let target = (0..SLOTS)
                .find(|&k| !claimed[k] && record.competitor(k) == Some(name.as_str()))
                .ok_or_else(|| CanonicalError::NotInRecord { name: name.clone() })?;
            claimed[target] = true;
            map[slot] = target;
        }
    }

    let unclaimed = |filled: bool| {
        (0..SLOTS).filter(move |&k| !claimed[k] && record.competitor(k).is_some() == filled)
    };
    let mut spare = unclaimed(false).chain(unclaimed(true));
    for (slot, entry) in selection.slots().iter().enumerate() {
        if entry.is_none() {
            map[slot] = spare.next().ok_or(CanonicalError::NoFreeSlot)?;
        }
    }
    Ok(map)
}

/// Sort keys of the four selection slots.
pub fn sort_keys(selection: &Selection, roster: &Roster) -> Result<[SortKey; SLOTS], CanonicalError> {
    let mut keys = [SortKey::Empty(0); SLOTS];
    let mut empty_rank = 0;
    for (slot, entry) in selection.slots().iter().enumerate() {
        keys[slot] = match entry {
            Some(name) => {
                let index = roster
                    .index_of(name)
                    .ok_or_else(|| CanonicalError::UnknownCompetitor { name: name.clone() })?;
                SortKey::Listed(index)
            }
            None => {
                let key = SortKey::Empty(empty_rank);
                empty_rank += 1;
                key
            }
        };
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        ["Alice", "Bob", "Carol", "Dave"]
            .map(String::from)
            .into_iter()
            .collect()
    }

    fn selection(names: [&str; SLOTS]) -> Selection {
        Selection::new(names.map(|n| (!n.is_empty()).then(|| n.to_string())))
    }

    #[test]
    fn pick_fills_first_empty_slot() {
        let mut sel = Selection::default();
        assert!(sel.pick("Bob"));
        assert!(sel.pick("Alice"));
        assert_eq!(sel.labels(), ["Bob", "Alice", "", ""]);
    }

    #[test]
    fn pick_is_noop_when_full_or_duplicate() {
        let mut sel = selection(["Alice", "Bob", "Carol", "Dave"]);
        assert!(!sel.pick("Eve"));

        let mut sel = selection(["Alice", "", "", ""]);
        assert!(!sel.pick("Alice"));
        assert_eq!(sel.labels(), ["Alice", "", "", ""]);
    }

    #[test]
    fn remove_clears_last_filled_slot() {
        let mut sel = selection(["Alice", "Bob", "", ""]);
        assert_eq!(sel.remove_last(), Some("Bob".to_string()));
        assert_eq!(sel.remove_last(), Some("Alice".to_string()));
        assert_eq!(sel.remove_last(), None);
        assert!(sel.is_empty());
    }

    #[test]
    fn pick_after_remove_refills_the_hole() {
        let mut sel = selection(["Alice", "Bob", "Carol", ""]);
        sel.remove_last();
        sel.pick("Dave");
        assert_eq!(sel.labels(), ["Alice", "Bob", "Dave", ""]);
    }

    #[test]
    fn sort_keys_rank_empties_left_to_right() {
        let keys = sort_keys(&selection(["", "Carol", "", "Alice"]), &roster()).unwrap();
        assert_eq!(
            keys,
            [
                SortKey::Empty(0),
                SortKey::Listed(2),
                SortKey::Empty(1),
                SortKey::Listed(0),
            ]
        );
    }

    #[test]
    fn listed_keys_sort_before_empty_keys() {
        assert!(SortKey::Listed(usize::MAX) < SortKey::Empty(0));
        assert!(SortKey::Empty(0) < SortKey::Empty(1));
    }

    #[test]
    fn canonical_order_sorts_by_roster_index() {
        let sel = selection(["Dave", "", "Bob", ""]);
        let canonical = Canonical::of(&sel, &roster()).unwrap();

        assert_eq!(
            canonical.arrange(sel.slots()),
            [Some("Bob".into()), Some("Dave".into()), None, None]
        );
        assert_eq!(canonical.position(0), 1);
        assert_eq!(canonical.position(1), 2);
        assert_eq!(canonical.position(2), 0);
        assert_eq!(canonical.position(3), 3);
    }

    #[test]
    fn arrange_moves_odds_with_their_competitor() {
        let sel = selection(["Carol", "Alice", "", ""]);
        let canonical = Canonical::of(&sel, &roster()).unwrap();
        assert_eq!(canonical.arrange(&[3.0, 1.0, 0.0, 0.0]), [1.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn canonical_selection_is_identity() {
        let sel = selection(["Alice", "Carol", "", ""]);
        assert!(Canonical::of(&sel, &roster()).unwrap().is_identity());
    }

    #[test]
    fn display_map_is_a_permutation() {
        let record = MatchupRecord::from_parts(
            [Some("Alice".into()), Some("Carol".into()), None, None],
            1,
            [1, 0, 0, 0],
            0,
            [0.0; SLOTS],
        );
        let map = display_map(&record, &selection(["", "Carol", "Alice", ""])).unwrap();
        assert_eq!(map, [2, 1, 0, 3]);
    }

    #[test]
    fn display_map_covers_records_with_repeated_names() {
        let record = MatchupRecord::from_parts(
            [Some("Alice".into()), Some("Alice".into()), None, None],
            1,
            [1, 0, 0, 0],
            0,
            [0.0; SLOTS],
        );
        let map = display_map(&record, &selection(["Alice", "", "", ""])).unwrap();
        assert_eq!(map, [0, 2, 3, 1]);
    }

    #[test]
    fn display_map_rejects_foreign_names() {
        let record = MatchupRecord::from_parts(
            [Some("Alice".into()), None, None, None],
            0,
            [0; SLOTS],
            0,
            [0.0; SLOTS],
        );
        assert_eq!(
            display_map(&record, &selection(["Bob", "", "", ""])),
            Err(CanonicalError::NotInRecord { name: "Bob".into() })
        );
    }

    #[test]
    fn unknown_competitor_is_reported() {
        let sel = selection(["Alice", "Zed", "", ""]);
        assert_eq!(
            Canonical::of(&sel, &roster()),
            Err(CanonicalError::UnknownCompetitor {
                name: "Zed".to_string()
            })
        );
    }
}
