//! Income, expense and operation CLI commands

use std::io::Write;

use clap::{Args, Subcommand};

use crate::display::format_operation_list;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{OperationId, OperationType};

use super::parse_amount;

/// Arguments shared by `income` and `expense`
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Account name or ID
    pub account: String,
    /// Amount, must be positive
    #[arg(allow_negative_numbers = true)]
    pub amount: String,
    /// Category name or ID
    pub category: String,
    /// Optional description
    #[arg(trailing_var_arg = true)]
    pub description: Vec<String>,
}

/// Operation subcommands
#[derive(Subcommand, Debug)]
pub enum OperationCommands {
    /// List operations
    List {
        /// Only show operations on this account (name or ID)
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Delete an operation record (the account balance is kept)
    Delete {
        /// Operation ID
        id: String,
    },
}

/// Record an income or an expense
pub fn handle_record_command<W: Write>(
    ledger: &Ledger,
    operation_type: OperationType,
    args: RecordArgs,
    out: &mut W,
) -> LedgerResult<()> {
    let amount = parse_amount(&args.amount, "amount")?;

    // Unknown names pass through as raw ids so the facade reports them
    let account_id = match ledger.accounts().find(&args.account)? {
        Some(account) => account.id.to_string(),
        None => args.account.clone(),
    };
    let category_id = match ledger.categories().find(&args.category)? {
        Some(category) => category.id.to_string(),
        None => args.category.clone(),
    };

    let description = args.description.join(" ");
    let description = (!description.trim().is_empty()).then_some(description.as_str());

    let service = ledger.operations();
    let operation = match operation_type {
        OperationType::Income => {
            service.create_income(&account_id, Some(amount), &category_id, description)?
        }
        OperationType::Expense => {
            service.create_expense(&account_id, Some(amount), &category_id, description)?
        }
    };

    let balance = ledger
        .accounts()
        .get_by_id(&operation.bank_account_id)?
        .map(|a| a.balance.to_string())
        .unwrap_or_default();

    writeln!(
        out,
        "Recorded {} of {} ({})",
        operation.operation_type.as_str().to_lowercase(),
        operation.amount,
        operation.description
    )?;
    writeln!(out, "  Account balance: {}", balance)?;
    writeln!(out, "  ID: {}", operation.id)?;
    Ok(())
}

/// Handle an operation command
pub fn handle_operation_command<W: Write>(
    ledger: &Ledger,
    cmd: OperationCommands,
    out: &mut W,
) -> LedgerResult<()> {
    let service = ledger.operations();

    match cmd {
        OperationCommands::List { account } => {
            let operations = match account {
                Some(account) => {
                    let found = ledger
                        .accounts()
                        .find(&account)?
                        .ok_or_else(|| LedgerError::account_not_found(&account))?;
                    service.list_by_account(&found.id)?
                }
                None => service.list()?,
            };

            let accounts = ledger.accounts().list()?;
            let categories = ledger.categories().list()?;
            write!(
                out,
                "{}",
                format_operation_list(&operations, &accounts, &categories)
            )?;
        }

        OperationCommands::Delete { id } => {
            let id = OperationId::parse(&id)
                .ok_or_else(|| LedgerError::Validation("Operation id cannot be empty".into()))?;

            if !service.delete(&id)? {
                return Err(LedgerError::operation_not_found(id.to_string()));
            }
            writeln!(out, "Deleted operation: {}", id)?;
        }
    }

    Ok(())
}
