//! Item identifiers
//!
//! Ids are plain numbers handed out by a monotonic counter. A store never
//! hands out the same id twice, even after the item carrying it is deleted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid item ID: expected a number, got '{0}'")]
    InvalidItemId(String),
}

/// Opaque identifier of a packing list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw id value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Accept the "#3" form the list output prints
        let digits = s.strip_prefix('#').unwrap_or(s);

        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| IdError::InvalidItemId(s.to_string()))
    }
}

/// Hands out fresh ids in increasing order
///
/// Once `u64::MAX` has been handed out the allocator is exhausted and
/// returns `None` from then on.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: Option<u64>,
}

impl IdAllocator {
    /// Creates an allocator whose first id is 1
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Creates an allocator that continues after the given ids
    pub fn after<'a>(ids: impl IntoIterator<Item = &'a ItemId>) -> Self {
        let next = match ids.into_iter().map(|id| id.0).max() {
            Some(largest) => largest.checked_add(1),
            None => Some(1),
        };
        Self { next }
    }

    /// Returns the next unused id, or `None` when none are left
    pub fn allocate(&mut self) -> Option<ItemId> {
        let current = self.next?;
        self.next = current.checked_add(1);
        Some(ItemId(current))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
