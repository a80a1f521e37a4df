//! Import pipeline
//!
//! An import runs in fixed stages: read the whole source, parse it into
//! records (collecting per-record diagnostics), validate the record list as a
//! whole, then persist through the facades. Parsing and validation never
//! touch the ledger, so a rejected import leaves it unchanged.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Account, Category, Operation};

use super::{csv, json, CsvOperationLayout, EntityKind, Format, Parsed, SkippedRecord};

/// How imported operations affect account balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Operations are settled history; imported balances already include them
    #[default]
    Settled,
    /// Each operation's delta is applied to its account as it is imported
    Replay,
}

/// Options for one import run
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub mode: ImportMode,
    pub operation_layout: CsvOperationLayout,
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Number of records stored
    pub imported: usize,
    /// Records left alone because their id already exists
    pub conflicts: usize,
    /// Records dropped while parsing or persisting
    pub skipped: Vec<SkippedRecord>,
}

impl ImportReport {
    fn new(skipped: Vec<SkippedRecord>) -> Self {
        Self {
            skipped,
            ..Self::default()
        }
    }
}

/// Read the full contents of an import source
pub fn read_source(path: impl AsRef<Path>) -> LedgerResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Decode accounts in the given format
pub fn parse_accounts(format: Format, content: &str) -> LedgerResult<Parsed<Account>> {
    match format {
        Format::Json => json::parse_accounts(content),
        Format::Csv => csv::parse_accounts(content),
    }
}

/// Decode categories in the given format
pub fn parse_categories(format: Format, content: &str) -> LedgerResult<Parsed<Category>> {
    match format {
        Format::Json => json::parse_categories(content),
        Format::Csv => csv::parse_categories(content),
    }
}

/// Decode operations in the given format
pub fn parse_operations(
    format: Format,
    content: &str,
    layout: CsvOperationLayout,
) -> LedgerResult<Parsed<Operation>> {
    match format {
        Format::Json => json::parse_operations(content),
        Format::Csv => csv::parse_operations(content, layout),
    }
}

/// Reject an empty account list or any account without a name
pub fn validate_accounts(parsed: &Parsed<Account>) -> LedgerResult<()> {
    ensure_not_empty(&parsed.records, "accounts")?;
    for (idx, account) in parsed.records.iter().enumerate() {
        account
            .validate()
            .map_err(|e| LedgerError::Validation(format!("Account #{}: {}", idx + 1, e)))?;
    }
    Ok(())
}

/// Reject an empty category list or any category without a name
pub fn validate_categories(parsed: &Parsed<Category>) -> LedgerResult<()> {
    ensure_not_empty(&parsed.records, "categories")?;
    for (idx, category) in parsed.records.iter().enumerate() {
        category
            .validate()
            .map_err(|e| LedgerError::Validation(format!("Category #{}: {}", idx + 1, e)))?;
    }
    Ok(())
}

/// Reject an empty operation list, non-positive amounts and missing references
pub fn validate_operations(parsed: &Parsed<Operation>) -> LedgerResult<()> {
    ensure_not_empty(&parsed.records, "operations")?;
    for (idx, operation) in parsed.records.iter().enumerate() {
        operation
            .validate()
            .map_err(|e| LedgerError::Validation(format!("Operation #{}: {}", idx + 1, e)))?;
    }
    Ok(())
}

fn ensure_not_empty<E>(records: &[E], what: &str) -> LedgerResult<()> {
    if records.is_empty() {
        return Err(LedgerError::Validation(format!("No {} to import", what)));
    }
    Ok(())
}

fn log_skipped(kind: EntityKind, skipped: &[SkippedRecord]) {
    for record in skipped {
        warn!(%kind, line = record.line, reason = %record.reason, "skipping record");
    }
}

/// Service that loads exported entity lists back into a ledger
pub struct ImportService<'a> {
    ledger: &'a Ledger,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Read a file and import it as the given entity list
    pub fn import_file(
        &self,
        kind: EntityKind,
        format: Format,
        path: impl AsRef<Path>,
        options: ImportOptions,
    ) -> LedgerResult<ImportReport> {
        let content = read_source(path)?;
        match kind {
            EntityKind::Accounts => self.import_accounts(format, &content),
            EntityKind::Categories => self.import_categories(format, &content),
            EntityKind::Operations => self.import_operations(format, &content, options),
        }
    }

    /// Import accounts, keeping their ids and balances
    pub fn import_accounts(&self, format: Format, content: &str) -> LedgerResult<ImportReport> {
        let parsed = parse_accounts(format, content)?;
        log_skipped(EntityKind::Accounts, &parsed.skipped);
        validate_accounts(&parsed)?;

        let facade = self.ledger.accounts();
        let mut report = ImportReport::new(parsed.skipped);

        for account in parsed.records {
            if facade.get_by_id(&account.id)?.is_some() {
                warn!(account_id = %account.id, "account already exists, keeping stored copy");
                report.conflicts += 1;
                continue;
            }
            facade.update(account)?;
            report.imported += 1;
        }

        self.summarize(EntityKind::Accounts, &report);
        Ok(report)
    }

    /// Import categories, keeping their ids
    pub fn import_categories(&self, format: Format, content: &str) -> LedgerResult<ImportReport> {
        let parsed = parse_categories(format, content)?;
        log_skipped(EntityKind::Categories, &parsed.skipped);
        validate_categories(&parsed)?;

        let facade = self.ledger.categories();
        let mut report = ImportReport::new(parsed.skipped);

        for category in parsed.records {
            if facade.get_by_id(&category.id)?.is_some() {
                warn!(category_id = %category.id, "category already exists, keeping stored copy");
                report.conflicts += 1;
                continue;
            }
            facade.update(category)?;
            report.imported += 1;
        }

        self.summarize(EntityKind::Categories, &report);
        Ok(report)
    }

    /// Import operations, either as settled history or replayed onto balances
    ///
    /// In replay mode an operation whose account is unknown, or whose delta
    /// would push the balance out of range, is skipped.
    pub fn import_operations(
        &self,
        format: Format,
        content: &str,
        options: ImportOptions,
    ) -> LedgerResult<ImportReport> {
        let parsed = parse_operations(format, content, options.operation_layout)?;
        log_skipped(EntityKind::Operations, &parsed.skipped);
        validate_operations(&parsed)?;

        let facade = self.ledger.operations();
        let mut report = ImportReport::new(parsed.skipped);

        for (idx, operation) in parsed.records.into_iter().enumerate() {
            if facade.get_by_id(&operation.id)?.is_some() {
                warn!(operation_id = %operation.id, "operation already exists, keeping stored copy");
                report.conflicts += 1;
                continue;
            }

            match options.mode {
                ImportMode::Settled => facade.restore(operation)?,
                ImportMode::Replay => match facade.replay(operation) {
                    Ok(_) => {}
                    Err(err) if err.is_not_found() || err.is_validation() => {
                        warn!(error = %err, "cannot replay operation");
                        report.skipped.push(SkippedRecord::new(idx + 1, err.to_string()));
                        continue;
                    }
                    Err(err) => return Err(err),
                },
            }
            report.imported += 1;
        }

        self.summarize(EntityKind::Operations, &report);
        Ok(report)
    }

    fn summarize(&self, kind: EntityKind, report: &ImportReport) {
        info!(
            %kind,
            imported = report.imported,
            conflicts = report.conflicts,
            skipped = report.skipped.len(),
            "import finished"
        );
    }
}
