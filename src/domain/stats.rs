//! Packing progress summary
//!
//! Stats are never stored. Every render recomputes them from the current
//! list.

use serde::Serialize;

use super::item::Item;

/// Counts derived from a list of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    /// Number of items on the list
    pub total: usize,

    /// Number of items already packed
    pub packed_count: usize,

    /// Packed share of the list, rounded to a whole percent
    pub packed_percent: u8,
}

impl Stats {
    /// Returns true once every item is packed
    pub fn is_complete(&self) -> bool {
        self.packed_percent == 100
    }

    /// The one-line summary shown under the list
    pub fn summary(&self) -> String {
        if self.is_complete() {
            "You got everything!".to_string()
        } else {
            format!(
                "You have {} items in the list. You already packed {} ({}%).",
                self.total, self.packed_count, self.packed_percent
            )
        }
    }
}

/// Computes the summary for a list of items
pub fn compute_stats(items: &[Item]) -> Stats {
    let total = items.len();
    let packed_count = items.iter().filter(|item| item.packed).count();

    Stats {
        total,
        packed_count,
        packed_percent: percent(packed_count, total),
    }
}

/// Rounds `part / whole * 100` half up, 0 for an empty whole
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (200 * part + whole) / (2 * whole);
    rounded.min(100) as u8
}
