//! Export entry points
//!
//! Pure functions from an entity list to text, selected by [`Format`], plus
//! the file write used by the session front end.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Account, Category, Operation};

use super::{csv, json, EntityKind, Format};

/// Render accounts in the given format
pub fn export_accounts(format: Format, accounts: &[Account]) -> LedgerResult<String> {
    match format {
        Format::Json => json::export_accounts(accounts),
        Format::Csv => Ok(csv::export_accounts(accounts)),
    }
}

/// Render categories in the given format
pub fn export_categories(format: Format, categories: &[Category]) -> LedgerResult<String> {
    match format {
        Format::Json => json::export_categories(categories),
        Format::Csv => Ok(csv::export_categories(categories)),
    }
}

/// Render operations in the given format
pub fn export_operations(format: Format, operations: &[Operation]) -> LedgerResult<String> {
    match format {
        Format::Json => json::export_operations(operations),
        Format::Csv => Ok(csv::export_operations(operations)),
    }
}

/// Render one whole entity list of the ledger
///
/// Returns the text and the number of records it holds.
pub fn export_entities(
    ledger: &Ledger,
    kind: EntityKind,
    format: Format,
) -> LedgerResult<(String, usize)> {
    match kind {
        EntityKind::Accounts => {
            let accounts = ledger.accounts().list()?;
            Ok((export_accounts(format, &accounts)?, accounts.len()))
        }
        EntityKind::Categories => {
            let categories = ledger.categories().list()?;
            Ok((export_categories(format, &categories)?, categories.len()))
        }
        EntityKind::Operations => {
            let operations = ledger.operations().list()?;
            Ok((export_operations(format, &operations)?, operations.len()))
        }
    }
}

/// Write export text to a file, creating or truncating it
pub fn write_export(path: impl AsRef<Path>, text: &str) -> LedgerResult<()> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|e| {
        LedgerError::Io(format!("Failed to write {}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), bytes = text.len(), "wrote export");
    Ok(())
}
