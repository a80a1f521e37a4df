//! Interactive session commands
//!
//! The session reads one command per line, parses it with clap and runs it
//! against a single in-memory [`Ledger`]. A failing command reports its error
//! and the session carries on.

pub mod account;
pub mod category;
pub mod export;
pub mod import;
pub mod operation;

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::codec::EntityKind;
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::OperationType;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::handle_export_command;
pub use import::handle_import_command;
pub use operation::{handle_operation_command, handle_record_command, OperationCommands, RecordArgs};

/// One line of session input
#[derive(Parser, Debug)]
#[command(
    name = "finledger",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Commands available inside a session
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Record an income: income <account> <amount> <category> [description]
    Income(RecordArgs),

    /// Record an expense: expense <account> <amount> <category> [description]
    Expense(RecordArgs),

    /// Operation history commands
    #[command(subcommand, alias = "op")]
    Operation(OperationCommands),

    /// Export an entity list: export <kind> [format] <path>
    Export {
        #[arg(value_enum)]
        kind: EntityKind,
        /// Optional format (json or csv) followed by the output path
        #[arg(num_args = 1..=2, required = true)]
        target: Vec<String>,
    },

    /// Import an entity list: import <kind> [format] <path>
    Import {
        #[arg(value_enum)]
        kind: EntityKind,
        /// Optional format (json or csv) followed by the input path
        #[arg(num_args = 1..=2, required = true)]
        target: Vec<String>,
        /// Apply imported operations to account balances
        #[arg(long)]
        replay: bool,
    },

    /// Show available commands
    Help,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parse a decimal command argument
pub(crate) fn parse_amount(s: &str, what: &str) -> LedgerResult<Decimal> {
    Decimal::from_str(s.trim()).map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid {} '{}'. Use a decimal like '1000.00'",
            what, s
        ))
    })
}

/// Split a command line into words, honouring single and double quotes
pub fn split_line(line: &str) -> LedgerResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(LedgerError::Validation("Unterminated quote".into()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// An interactive session over one ledger
pub struct Session {
    ledger: Ledger,
    settings: Settings,
    prompt: bool,
}

impl Session {
    /// Create a session over an empty ledger
    pub fn new(settings: Settings) -> Self {
        Self {
            ledger: Ledger::new(),
            settings,
            prompt: false,
        }
    }

    /// Print a prompt before each line
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// The ledger this session works on
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Read commands until end of input or `quit`
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> LedgerResult<()> {
        let mut lines = input.lines();

        loop {
            if self.prompt {
                write!(out, "finledger> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let started = Instant::now();
            let name = line.split_whitespace().next().unwrap_or_default().to_string();

            let flow = match self.execute(&line, out) {
                Ok(flow) => flow,
                Err(err) => {
                    debug!(command = %name, error = %err, "command failed");
                    writeln!(out, "Error: {}", err)?;
                    Flow::Continue
                }
            };

            info!(
                command = %name,
                elapsed_us = started.elapsed().as_micros() as u64,
                "command finished"
            );

            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Run a single command line
    pub fn execute<W: Write>(&self, line: &str, out: &mut W) -> LedgerResult<Flow> {
        let words = split_line(line)?;

        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => {
                // Covers `--help` on a subcommand as well as usage errors
                write!(out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };

        match parsed.command {
            SessionCommand::Account(cmd) => handle_account_command(&self.ledger, cmd, out)?,
            SessionCommand::Category(cmd) => handle_category_command(&self.ledger, cmd, out)?,
            SessionCommand::Income(args) => {
                handle_record_command(&self.ledger, OperationType::Income, args, out)?
            }
            SessionCommand::Expense(args) => {
                handle_record_command(&self.ledger, OperationType::Expense, args, out)?
            }
            SessionCommand::Operation(cmd) => handle_operation_command(&self.ledger, cmd, out)?,
            SessionCommand::Export { kind, target } => {
                handle_export_command(&self.ledger, &self.settings, kind, &target, out)?
            }
            SessionCommand::Import {
                kind,
                target,
                replay,
            } => handle_import_command(&self.ledger, &self.settings, kind, &target, replay, out)?,
            SessionCommand::Help => {
                write!(out, "{}", SessionLine::command().render_help())?;
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}
