//! Ordering and best-value selection over a snapshot of entries.
//!
//! Everything here is a pure function of the slice it is given; the store
//! stays the only owner of the list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Oldest first, by `added_at`.
    #[default]
    Insertion,
    /// Cheapest per milliliter first.
    UnitPrice,
}

impl SortMode {
    pub fn toggled(self) -> Self {
        match self {
            SortMode::Insertion => SortMode::UnitPrice,
            SortMode::UnitPrice => SortMode::Insertion,
        }
    }

    /// Label for the button that switches *to* the other mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            SortMode::Insertion => "Sort by price",
            SortMode::UnitPrice => "Sort by order added",
        }
    }
}

/// How many entries must exist before one of them is called the best deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestDealPolicy {
    pub min_entries: usize,
}

impl Default for BestDealPolicy {
    fn default() -> Self {
        Self { min_entries: 2 }
    }
}

/// Stable ascending sort. Equal keys keep their relative order.
pub fn sort_by(entries: &[Entry], mode: SortMode) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    match mode {
        SortMode::Insertion => sorted.sort_by_key(|entry| entry.added_at()),
        SortMode::UnitPrice => sorted.sort_by(|a, b| compare_unit_price(a, b)),
    }
    sorted
}

/// Lowest unit price among the entries, scanning left to right so the
/// earliest entry wins a tie. `None` below the policy's minimum count; a
/// zero minimum behaves like one, since an empty list has no best deal.
pub fn best_deal(entries: &[Entry], policy: BestDealPolicy) -> Option<&Entry> {
    if entries.len() < policy.min_entries {
        return None;
    }

    entries.iter().fold(None, |best: Option<&Entry>, candidate| match best {
        Some(current) if compare_unit_price(candidate, current) != Ordering::Less => Some(current),
        _ => Some(candidate),
    })
}

fn compare_unit_price(a: &Entry, b: &Entry) -> Ordering {
    a.unit_price().total_cmp(&b.unit_price())
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedRow {
    pub entry: Entry,
    pub is_best: bool,
    /// Percentage above the best deal's unit price, when there is one.
    pub premium_pct: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankedView {
    pub rows: Vec<RankedRow>,
    pub best: Option<Entry>,
}

/// Sorted rows ready for rendering, with the best deal flagged.
pub fn rank(entries: &[Entry], mode: SortMode, policy: BestDealPolicy) -> RankedView {
    let best = best_deal(entries, policy);
    let best_id: Option<EntryId> = best.map(Entry::id);
    let best_unit = best.map(Entry::unit_price);

    let rows = sort_by(entries, mode)
        .into_iter()
        .map(|entry| {
            let premium_pct = best_unit
                .filter(|unit| *unit > 0.0)
                .map(|unit| (entry.unit_price() / unit - 1.0) * 100.0);
            RankedRow {
                entry: entry.clone(),
                is_best: Some(entry.id()) == best_id,
                premium_pct,
            }
        })
        .collect();

    RankedView {
        rows,
        best: best.cloned(),
    }
}
