//! # Command-Line Interface
//!
//! Everything between the terminal and the item store.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | (none), `tui` | Interactive packing list |
//! | `list` | Print the list |
//! | `stats` | Print the packing summary |
//! | `shell` | Apply commands read from stdin |
//!
//! ## Output Formats
//!
//! `list`, `stats` and `shell` support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! packlist --verbose stats
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod render;
mod shell;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
