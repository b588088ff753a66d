//! Line-oriented command shell
//!
//! Reads one command per line and applies it to the store. The shell
//! subscribes to the store, so the list is printed again after every
//! change and never after a command that changed nothing.

use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};

use super::output::Output;
use super::render::{list_with_summary, ListView};
use crate::domain::{compute_stats, Action, ActionError, ItemStore};

pub const HELP: &str = "\
Commands:
  add [QTY] DESCRIPTION   add an item (QTY defaults to 1)
  toggle ID               mark an item packed / unpacked
  qty ID N                set the quantity of an item
  delete ID               remove an item
  list                    show the list
  stats                   show the summary
  help                    show this help
  quit                    leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(Action),
    List,
    Stats,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let first = words.next().unwrap_or("");

        let command = match first.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return s.parse().map(Command::Apply),
        };

        match words.next() {
            Some(extra) => Err(ActionError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

/// Runs the shell until `quit` or end of input
pub fn run<R: BufRead>(input: R, mut store: ItemStore, output: &Output) -> Result<()> {
    let renderer = *output;
    let mut revision = store.revision();
    store.subscribe(move |items| {
        revision += 1;
        if renderer.is_json() {
            renderer.data(&ListView::new(revision, items));
        } else {
            renderer.line(&list_with_summary(items));
            renderer.line("");
        }
    });

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                output.error(&format!("line {}: {}", index + 1, e));
                continue;
            }
        };
        output.verbose_ctx("shell", &format!("{:?}", command));

        match command {
            Command::Apply(action) => {
                if !store.dispatch(action) {
                    output.verbose_ctx("shell", "No change");
                }
            }
            Command::List => {
                if output.is_json() {
                    output.data(&ListView::new(store.revision(), store.items()));
                } else {
                    output.line(&list_with_summary(store.items()));
                }
            }
            Command::Stats => {
                let stats = compute_stats(store.items());
                if output.is_json() {
                    output.data(&stats);
                } else {
                    output.line(&stats.summary());
                }
            }
            Command::Help => output.line(HELP),
            Command::Quit => break,
        }
    }

    output.verbose_ctx("shell", &format!("Finished at revision {}", store.revision()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    #[test]
    fn parse_shell_commands() {
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
        assert_eq!("LS".parse::<Command>().unwrap(), Command::List);
        assert_eq!("stats".parse::<Command>().unwrap(), Command::Stats);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!(
            "toggle 1".parse::<Command>().unwrap(),
            Command::Apply(Action::TogglePacked(ItemId::new(1)))
        );
    }

    #[test]
    fn parse_rejects_words_after_plain_commands() {
        assert_eq!(
            "list extra".parse::<Command>(),
            Err(ActionError::UnexpectedArgument("extra".to_string()))
        );
        assert_eq!(
            "stats foo".parse::<Command>(),
            Err(ActionError::UnexpectedArgument("foo".to_string()))
        );
        assert!("quit now".parse::<Command>().is_err());
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert_eq!(
            "jump".parse::<Command>(),
            Err(ActionError::UnknownCommand("jump".to_string()))
        );
    }

    #[test]
    fn run_survives_bad_lines() {
        let input = "bogus\nqty 1\n# comment\n\nadd 2 Socks\n".as_bytes();
        let output = Output::new(crate::cli::OutputFormat::Text, false);
        assert!(run(input, ItemStore::seeded(), &output).is_ok());
    }
}
