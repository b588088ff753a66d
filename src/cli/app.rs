//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::render::{item_line, EMPTY_LIST};
use super::{shell, tui};
use crate::config::Config;
use crate::domain::{compute_stats, ItemStore};

#[derive(Parser)]
#[command(name = "packlist")]
#[command(author, version, about = "A terminal packing list for your next trip")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, short = 'c', global = true, env = "PACKLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start with an empty list instead of the example items
    #[arg(long, global = true)]
    pub no_seed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive packing list (default)
    Tui,

    /// Print the list
    List,

    /// Print how much is packed
    Stats,

    /// Read commands from stdin, one per line
    ///
    /// Examples:
    ///   add 3 Socks
    ///   toggle 1
    ///   qty 2 4
    ///   delete 3
    Shell,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose_ctx(
        "config",
        &match &cli.config {
            Some(path) => format!("Loaded {}", path.display()),
            None => format!(
                "Using {}",
                Config::default_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "defaults".to_string())
            ),
        },
    );

    let store = if cli.no_seed || !config.seed {
        output.verbose("Starting with an empty list");
        ItemStore::new()
    } else {
        ItemStore::seeded()
    };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => tui::run(&output, store, &config)?,
        Commands::List => list(&output, &store),
        Commands::Stats => stats(&output, &store),
        Commands::Shell => {
            output.verbose_ctx("shell", "Reading commands from stdin");
            shell::run(io::stdin().lock(), store, &output)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn list(output: &Output, store: &ItemStore) {
    if output.is_json() {
        output.data(&store.items());
    } else if store.is_empty() {
        output.line(EMPTY_LIST);
    } else {
        for item in store.items() {
            output.line(&item_line(item));
        }
    }
}

fn stats(output: &Output, store: &ItemStore) {
    let stats = compute_stats(store.items());
    if output.is_json() {
        output.data(&stats);
    } else {
        output.line(&stats.summary());
    }
}
