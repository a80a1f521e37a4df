//! Account CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::display::format_account_list;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

use super::parse_amount;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Starting balance (e.g. "1000.00")
        #[arg(allow_negative_numbers = true)]
        balance: String,
    },
    /// List all accounts
    List,
    /// Rename an account
    Rename {
        /// Account name or ID
        account: String,
        /// New name
        name: String,
    },
    /// Delete an account
    Delete {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command<W: Write>(
    ledger: &Ledger,
    cmd: AccountCommands,
    out: &mut W,
) -> LedgerResult<()> {
    let service = ledger.accounts();

    match cmd {
        AccountCommands::Create { name, balance } => {
            let balance = parse_amount(&balance, "balance")?;
            let account = service.create(&name, Some(balance))?;

            writeln!(out, "Created account: {}", account.name)?;
            writeln!(out, "  Balance: {}", account.balance)?;
            writeln!(out, "  ID: {}", account.id)?;
        }

        AccountCommands::List => {
            write!(out, "{}", format_account_list(&service.list()?))?;
        }

        AccountCommands::Rename { account, name } => {
            let mut found = service
                .find(&account)?
                .ok_or_else(|| LedgerError::account_not_found(&account))?;

            found.name = name;
            service.update(found.clone())?;
            writeln!(out, "Renamed account {} to {}", found.id, found.name.trim())?;
        }

        AccountCommands::Delete { account } => {
            let found = service
                .find(&account)?
                .ok_or_else(|| LedgerError::account_not_found(&account))?;

            service.delete(&found.id)?;
            writeln!(out, "Deleted account: {}", found.name)?;
        }
    }

    Ok(())
}
