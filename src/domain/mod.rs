//! Domain models for packlist
//!
//! Contains the packing list and its summary without any I/O concerns.

mod id;
mod item;
mod stats;
mod store;

pub use id::{IdAllocator, IdError, ItemId};
pub use item::{Item, Quantity, QuantityError};
pub use stats::{compute_stats, Stats};
pub use store::{Action, ActionError, ItemStore, SubscriptionId};
