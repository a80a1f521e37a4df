//! Category CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::OperationType;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a new category
    Create {
        /// Category type (income or expense)
        #[arg(value_parser = parse_operation_type)]
        category_type: OperationType,
        /// Category name
        name: String,
    },
    /// List categories
    List {
        /// Only show categories of this type
        #[arg(short = 't', long = "type", value_parser = parse_operation_type)]
        category_type: Option<OperationType>,
    },
    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },
    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },
}

pub(crate) fn parse_operation_type(s: &str) -> Result<OperationType, String> {
    OperationType::parse(s)
        .ok_or_else(|| format!("invalid type '{}', expected income or expense", s))
}

/// Handle a category command
pub fn handle_category_command<W: Write>(
    ledger: &Ledger,
    cmd: CategoryCommands,
    out: &mut W,
) -> LedgerResult<()> {
    let service = ledger.categories();

    match cmd {
        CategoryCommands::Create {
            category_type,
            name,
        } => {
            let category = service.create(Some(category_type), &name)?;

            writeln!(out, "Created category: {}", category.name)?;
            writeln!(out, "  Type: {}", category.category_type)?;
            writeln!(out, "  ID: {}", category.id)?;
        }

        CategoryCommands::List { category_type } => {
            let categories = match category_type {
                Some(t) => service.list_by_type(t)?,
                None => service.list()?,
            };
            write!(out, "{}", format_category_list(&categories))?;
        }

        CategoryCommands::Rename { category, name } => {
            let mut found = service
                .find(&category)?
                .ok_or_else(|| LedgerError::category_not_found(&category))?;

            found.name = name;
            service.update(found.clone())?;
            writeln!(out, "Renamed category {} to {}", found.id, found.name.trim())?;
        }

        CategoryCommands::Delete { category } => {
            let found = service
                .find(&category)?
                .ok_or_else(|| LedgerError::category_not_found(&category))?;

            service.delete(&found.id)?;
            writeln!(out, "Deleted category: {}", found.name)?;
        }
    }

    Ok(())
}
