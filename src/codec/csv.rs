//! CSV codec
//!
//! Export writes a header line and one `\n`-terminated line per record,
//! quoting only the fields that need it. Import reads through the `csv`
//! crate with a required header row; lines that are too short or carry
//! unparseable values are skipped and reported.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;

use crate::error::LedgerResult;
use crate::models::{
    Account, AccountId, Category, CategoryId, Operation, OperationId, OperationType,
};

use super::{parse_decimal_exact, CsvOperationLayout, Parsed, SkippedRecord};

const ACCOUNT_HEADER: &str = "id,name,balance";
const CATEGORY_HEADER: &str = "id,type,name";
const OPERATION_HEADER: &str = "id,type,bankAccountId,amount,date,description,categoryId";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Export accounts to CSV
pub fn export_accounts(accounts: &[Account]) -> String {
    let mut out = String::new();
    out.push_str(ACCOUNT_HEADER);
    out.push('\n');

    for account in accounts {
        out.push_str(&format!(
            "{},{},{}\n",
            escape_csv(account.id.as_str()),
            escape_csv(&account.name),
            account.balance
        ));
    }

    out
}

/// Export categories to CSV
pub fn export_categories(categories: &[Category]) -> String {
    let mut out = String::new();
    out.push_str(CATEGORY_HEADER);
    out.push('\n');

    for category in categories {
        out.push_str(&format!(
            "{},{},{}\n",
            escape_csv(category.id.as_str()),
            category.category_type,
            escape_csv(&category.name)
        ));
    }

    out
}

/// Export operations to CSV in the canonical column order
pub fn export_operations(operations: &[Operation]) -> String {
    let mut out = String::new();
    out.push_str(OPERATION_HEADER);
    out.push('\n');

    for op in operations {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            escape_csv(op.id.as_str()),
            op.operation_type,
            escape_csv(op.bank_account_id.as_str()),
            op.amount,
            op.date.format(DATE_FORMAT),
            escape_csv(&op.description),
            escape_csv(op.category_id.as_str())
        ));
    }

    out
}

/// Escape a string for CSV output
///
/// Padded values are quoted too, so a reader that trims unquoted fields
/// keeps their whitespace.
fn escape_csv(s: &str) -> String {
    let padded = s.trim() != s;
    if padded || s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Import accounts from CSV
pub fn parse_accounts(content: &str) -> LedgerResult<Parsed<Account>> {
    read_rows(content, 3, |record| {
        Ok(Account::from_parts(
            AccountId::from(required(record, 0, "id")?),
            field(record, 1),
            parse_decimal(field(record, 2), "balance")?,
        ))
    })
}

/// Import categories from CSV
pub fn parse_categories(content: &str) -> LedgerResult<Parsed<Category>> {
    read_rows(content, 3, |record| {
        Ok(Category::from_parts(
            CategoryId::from(required(record, 0, "id")?),
            parse_type(field(record, 1))?,
            field(record, 2),
        ))
    })
}

/// Import operations from CSV
///
/// With [`CsvOperationLayout::Auto`] the layout is taken from the header:
/// a sixth column named `categoryId` means the legacy order.
pub fn parse_operations(content: &str, layout: CsvOperationLayout) -> LedgerResult<Parsed<Operation>> {
    let mut reader = reader(content);
    let headers = reader.headers()?.clone();

    let layout = match layout {
        CsvOperationLayout::Auto => CsvOperationLayout::detect(&headers),
        forced => forced,
    };
    let (description_col, category_col) = match layout {
        CsvOperationLayout::Legacy => (6, 5),
        _ => (5, 6),
    };

    collect_rows(reader, 7, |record| {
        Ok(Operation::from_parts(
            OperationId::from(required(record, 0, "id")?),
            parse_type(field(record, 1))?,
            AccountId::from(field(record, 2)),
            parse_decimal(field(record, 3), "amount")?,
            parse_date(field(record, 4))?,
            CategoryId::from(field(record, category_col)),
            Some(raw_field(record, description_col).to_string()),
        ))
    })
}

impl CsvOperationLayout {
    /// Pick the layout described by a header row
    pub fn detect(headers: &StringRecord) -> Self {
        match headers.get(5) {
            Some(column) if column.eq_ignore_ascii_case("categoryId") => Self::Legacy,
            _ => Self::Canonical,
        }
    }
}

fn reader(content: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes())
}

fn read_rows<E, F>(content: &str, columns: usize, decode: F) -> LedgerResult<Parsed<E>>
where
    F: Fn(&StringRecord) -> Result<E, String>,
{
    collect_rows(reader(content), columns, decode)
}

fn collect_rows<E, F>(mut reader: csv::Reader<&[u8]>, columns: usize, decode: F) -> LedgerResult<Parsed<E>>
where
    F: Fn(&StringRecord) -> Result<E, String>,
{
    let mut parsed = Parsed::default();

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1
        let fallback_line = idx + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                parsed
                    .skipped
                    .push(SkippedRecord::new(line, format!("unreadable line: {}", e)));
                continue;
            }
        };

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        if record.len() < columns {
            parsed.skipped.push(SkippedRecord::new(
                line,
                format!("expected {} columns, found {}", columns, record.len()),
            ));
            continue;
        }

        match decode(&record) {
            Ok(entity) => parsed.records.push(entity),
            Err(reason) => parsed.skipped.push(SkippedRecord::new(line, reason)),
        }
    }

    Ok(parsed)
}

/// Trimmed value of a column, empty when the column is missing
fn field(record: &StringRecord, index: usize) -> &str {
    raw_field(record, index).trim()
}

/// Untrimmed value of a column
fn raw_field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn required<'r>(record: &'r StringRecord, index: usize, name: &str) -> Result<&'r str, String> {
    let value = field(record, index);
    if value.is_empty() {
        Err(format!("missing {}", name))
    } else {
        Ok(value)
    }
}

fn parse_decimal(s: &str, name: &str) -> Result<Decimal, String> {
    parse_decimal_exact(s).map_err(|reason| format!("{}: {}", name, reason))
}

fn parse_type(s: &str) -> Result<OperationType, String> {
    OperationType::parse(s).ok_or_else(|| format!("invalid type '{}'", s))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| format!("invalid date '{}'", s))
}
