//! Screens drawn by the TUI

pub mod packing;
