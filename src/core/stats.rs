//! Derived display values: percentages, odds parsing, pagination and
//! roster highlighting.

use super::book::RecordBook;
use super::canonical::Selection;
use super::record::SLOTS;
use super::roster::Roster;
use serde::{Deserialize, Serialize};

/// Text shown in place of names on the empty-collection page.
pub const NO_DATA: &str = "NO_DATA";

/// Format a fraction as a percentage with two decimals, or blank.
///
/// ```rust
/// use arena_stats::core::stats::format_percent;
///
/// assert_eq!(format_percent(Some(1.0)), "100.00%");
/// assert_eq!(format_percent(Some(1.0 / 3.0)), "33.33%");
/// assert_eq!(format_percent(None), "");
/// ```
pub fn format_percent(fraction: Option<f64>) -> String {
    fraction
        .map(|f| format!("{:.2}%", f * 100.0))
        .unwrap_or_default()
}

/// Format a value already expressed in percent.
pub fn format_percent_value(percent: Option<f64>) -> String {
    percent.map(|p| format!("{p:.2}%")).unwrap_or_default()
}

/// Parse operator-entered odds.
///
/// Any finite number is accepted, negative values included. Blank,
/// non-numeric and non-finite input is rejected.
pub fn parse_odds(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse odds for storage; anything unparseable counts as zero.
pub fn odds_or_zero(input: &str) -> f64 {
    parse_odds(input).unwrap_or(0.0)
}

/// Format stored odds for pre-filling an entry field.
pub fn format_odds(odds: f64) -> String {
    format!("{odds}")
}

/// Clamp a requested 1-based page into `1..=max(count, 1)`.
///
/// ```rust
/// use arena_stats::core::stats::clamp_page;
///
/// assert_eq!(clamp_page(0, 5), 1);
/// assert_eq!(clamp_page(-3, 5), 1);
/// assert_eq!(clamp_page(9, 5), 5);
/// assert_eq!(clamp_page(4, 0), 1);
/// ```
pub fn clamp_page(requested: i64, count: usize) -> usize {
    let last = count.max(1);
    match usize::try_from(requested) {
        Ok(page) => page.clamp(1, last),
        Err(_) => 1,
    }
}

/// One fully rendered page of the read-only statistics view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub names: [String; SLOTS],
    pub wins: [String; SLOTS],
    pub ratios: [String; SLOTS],
    pub total: String,
    pub draws: String,
    pub current: String,
    pub count: String,
}

impl PageView {
    /// Placeholder page for an empty collection.
    pub fn placeholder() -> Self {
        Self {
            names: std::array::from_fn(|_| NO_DATA.to_string()),
            wins: std::array::from_fn(|_| "-".to_string()),
            ratios: std::array::from_fn(|_| "-".to_string()),
            total: "0".to_string(),
            draws: "0".to_string(),
            current: "0".to_string(),
            count: "0".to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.current == "0"
    }
}

/// Render `page` (1-based) of `book`, or the placeholder when the page
/// does not exist.
pub fn page_view(book: &RecordBook, page: usize) -> PageView {
    let Some(record) = page.checked_sub(1).and_then(|index| book.get(index)) else {
        return PageView::placeholder();
    };

    let mut view = PageView {
        names: std::array::from_fn(|slot| record.competitor(slot).unwrap_or("").to_string()),
        wins: std::array::from_fn(|slot| record.wins()[slot].to_string()),
        ratios: std::array::from_fn(|slot| format_percent(record.win_rate(slot))),
        total: record.total().to_string(),
        draws: record.draws().to_string(),
        current: page.to_string(),
        count: book.len().to_string(),
    };
    for slot in record.empty_slots() {
        view.wins[slot].clear();
        view.ratios[slot].clear();
    }
    view
}

/// Marker drawn on a roster button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    #[default]
    Neutral,
    /// The entry is part of the current selection.
    Selected,
    /// The entry has faced every selected competitor before.
    Suggested,
}

/// Highlight for each roster entry, in roster order.
pub fn highlights(roster: &Roster, selection: &Selection, book: &RecordBook) -> Vec<Highlight> {
    let selected = selection.name_set();
    let suggested = book.co_occurring(&selected);
    roster
        .iter()
        .map(|name| {
            if selected.contains(name) {
                Highlight::Selected
            } else if suggested.contains(name) {
                Highlight::Suggested
            } else {
                Highlight::Neutral
            }
        })
        .collect()
}
