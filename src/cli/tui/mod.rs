//! Interactive TUI for packlist
//!
//! Shows the add form, the list and the packing summary in one screen,
//! redrawn after every key press, using ratatui.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use crate::config::Config;
use crate::domain::ItemStore;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, store: ItemStore, config: &Config) -> Result<()> {
    output.verbose_ctx(
        "tui",
        &format!("Starting with {} items, tick {}ms", store.len(), config.tick_rate_ms),
    );

    let mut app = App::new(store, config);
    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new(config.tick_rate_ms);

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
            output.verbose_ctx("tui", &format!("Closed with {} items", app.items().len()));
            Ok(())
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
