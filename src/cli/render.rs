//! Plain-text rendering of the packing list

use serde::Serialize;

use crate::domain::{compute_stats, Item, Stats};

/// Text shown in place of an empty list
pub const EMPTY_LIST: &str = "No items on the list yet";

/// Machine-readable view of the list at one revision
#[derive(Debug, Serialize)]
pub struct ListView<'a> {
    pub revision: u64,
    pub items: &'a [Item],
    pub stats: Stats,
}

impl<'a> ListView<'a> {
    pub fn new(revision: u64, items: &'a [Item]) -> Self {
        Self {
            revision,
            items,
            stats: compute_stats(items),
        }
    }
}

/// Renders one item as `  #1  [x] 5x Shirt`
pub fn item_line(item: &Item) -> String {
    let mark = if item.packed { 'x' } else { ' ' };
    format!("{:>4}  [{}] {}", format!("#{}", item.id), mark, item)
}

/// Renders the list followed by the summary line
pub fn list_with_summary(items: &[Item]) -> String {
    let mut lines: Vec<String> = if items.is_empty() {
        vec![EMPTY_LIST.to_string()]
    } else {
        items.iter().map(item_line).collect()
    };

    lines.push(String::new());
    lines.push(compute_stats(items).summary());
    lines.join("\n")
}
