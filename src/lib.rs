//! packlist - A terminal packing list for your next trip
//!
//! Keeps an in-memory list of things to pack, each with a quantity and a
//! packed flag, and reports how much of the list is already in the bag.
//! The list lives for one session; nothing is written to disk.

pub mod domain;
pub mod config;
pub mod cli;

pub use domain::{compute_stats, Action, Item, ItemId, ItemStore, Quantity, Stats};
