//! Packing list item model
//!
//! An item is one line on the list: what to pack, how many, and whether it
//! is already in the bag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

use super::id::ItemId;

#[derive(Debug, Error, PartialEq)]
pub enum QuantityError {
    #[error("Quantity must be at least 1")]
    Zero,

    #[error("Invalid quantity: expected a positive number, got '{0}'")]
    Invalid(String),
}

/// How many of an item to pack
///
/// Always positive. The UI selectors stay within `1..=UI_MAX`, but the
/// store accepts any positive value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const MIN: Quantity = Quantity(NonZeroU32::MIN);

    /// Upper bound of the quantity selectors
    pub const UI_MAX: u32 = 10;

    /// Creates a quantity, rejecting zero
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(value).map(Self).ok_or(QuantityError::Zero)
    }

    /// Returns the raw count
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Returns the next value up, saturating at `max`
    pub fn step_up(self, max: u32) -> Self {
        let next = self.get().saturating_add(1).min(max.max(1));
        Self::new(next).unwrap_or(self)
    }

    /// Returns the next value down, saturating at 1
    pub fn step_down(self) -> Self {
        Self::new(self.get() - 1).unwrap_or(Self::MIN)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: u32 = s
            .parse()
            .map_err(|_| QuantityError::Invalid(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

/// A single packing list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned by the store
    pub id: ItemId,

    /// What to pack
    pub description: String,

    /// How many to pack
    #[serde(default)]
    pub quantity: Quantity,

    /// Already in the bag
    #[serde(default)]
    pub packed: bool,
}

impl Item {
    /// Creates an unpacked item
    pub fn new(id: ItemId, description: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            id,
            description: description.into(),
            quantity,
            packed: false,
        }
    }

    /// Returns a copy with the packed flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            packed: !self.packed,
            ..self.clone()
        }
    }

    /// Returns a copy with a different quantity
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    /// Returns a copy with the packed flag set
    pub fn into_packed(mut self) -> Self {
        self.packed = true;
        self
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.quantity, self.description)
    }
}
