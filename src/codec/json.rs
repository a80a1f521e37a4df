//! JSON codec
//!
//! Each entity list is a JSON array of flat objects. Keys are written in a
//! fixed order and decimals are written as unquoted numeric literals carrying
//! their exact text, so `1000.00` stays `1000.00`.
//!
//! Decoding is two-staged: the blob must be a JSON array (or the whole
//! import fails), then each element is decoded on its own and elements that
//! are not well-formed records are skipped with a diagnostic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Operation, OperationId, OperationType,
};

use super::{parse_decimal_exact, Parsed, SkippedRecord};

#[derive(Serialize)]
struct AccountOut<'a> {
    id: &'a str,
    name: &'a str,
    balance: Box<RawValue>,
}

#[derive(Deserialize)]
struct AccountIn {
    id: String,
    name: String,
    balance: Box<RawValue>,
}

#[derive(Serialize)]
struct CategoryOut<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    category_type: OperationType,
    name: &'a str,
}

#[derive(Deserialize)]
struct CategoryIn {
    id: String,
    #[serde(rename = "type")]
    category_type: OperationType,
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationOut<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    operation_type: OperationType,
    bank_account_id: &'a str,
    amount: Box<RawValue>,
    date: NaiveDate,
    description: &'a str,
    category_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationIn {
    id: String,
    #[serde(rename = "type")]
    operation_type: OperationType,
    bank_account_id: String,
    amount: Box<RawValue>,
    date: NaiveDate,
    #[serde(default)]
    description: Option<String>,
    category_id: String,
}

/// Render a decimal as a raw JSON number with its exact digits
fn decimal_to_raw(value: &Decimal) -> LedgerResult<Box<RawValue>> {
    RawValue::from_string(value.to_string())
        .map_err(|e| LedgerError::Format(format!("Cannot encode decimal {}: {}", value, e)))
}

/// Read a decimal from a raw JSON number or a quoted numeric string
fn decimal_from_raw(raw: &RawValue) -> Result<Decimal, String> {
    let text = raw.get().trim();
    let digits = if text.starts_with('"') {
        serde_json::from_str::<String>(text).map_err(|e| e.to_string())?
    } else {
        text.to_string()
    };
    parse_decimal_exact(&digits)
}

fn require_id(value: &str, field: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(format!("missing {}", field))
    } else {
        Ok(value.to_string())
    }
}

/// Split the blob into raw array elements
fn split_array(content: &str) -> LedgerResult<Vec<Box<RawValue>>> {
    serde_json::from_str::<Vec<Box<RawValue>>>(content)
        .map_err(|e| LedgerError::Format(format!("Expected a JSON array of records: {}", e)))
}

/// Decode every element, collecting the ones that fail as skipped
fn decode_each<E, F>(content: &str, decode: F) -> LedgerResult<Parsed<E>>
where
    F: Fn(&str) -> Result<E, String>,
{
    let mut parsed = Parsed::default();

    for (index, element) in split_array(content)?.iter().enumerate() {
        match decode(element.get()) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => parsed.skipped.push(SkippedRecord::new(index + 1, reason)),
        }
    }

    Ok(parsed)
}

fn to_pretty<T: Serialize>(rows: &[T]) -> LedgerResult<String> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| LedgerError::Format(format!("Failed to encode JSON: {}", e)))
}

/// Encode accounts as a JSON array
pub fn export_accounts(accounts: &[Account]) -> LedgerResult<String> {
    let rows = accounts
        .iter()
        .map(|a| {
            Ok(AccountOut {
                id: a.id.as_str(),
                name: &a.name,
                balance: decimal_to_raw(&a.balance)?,
            })
        })
        .collect::<LedgerResult<Vec<_>>>()?;

    to_pretty(&rows)
}

/// Encode categories as a JSON array
pub fn export_categories(categories: &[Category]) -> LedgerResult<String> {
    let rows: Vec<_> = categories
        .iter()
        .map(|c| CategoryOut {
            id: c.id.as_str(),
            category_type: c.category_type,
            name: &c.name,
        })
        .collect();

    to_pretty(&rows)
}

/// Encode operations as a JSON array
pub fn export_operations(operations: &[Operation]) -> LedgerResult<String> {
    let rows = operations
        .iter()
        .map(|op| {
            Ok(OperationOut {
                id: op.id.as_str(),
                operation_type: op.operation_type,
                bank_account_id: op.bank_account_id.as_str(),
                amount: decimal_to_raw(&op.amount)?,
                date: op.date,
                description: &op.description,
                category_id: op.category_id.as_str(),
            })
        })
        .collect::<LedgerResult<Vec<_>>>()?;

    to_pretty(&rows)
}

/// Decode accounts from a JSON array
pub fn parse_accounts(content: &str) -> LedgerResult<Parsed<Account>> {
    decode_each(content, |raw| {
        let record: AccountIn = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        Ok(Account::from_parts(
            AccountId::from(require_id(&record.id, "id")?),
            record.name.trim(),
            decimal_from_raw(&record.balance)?,
        ))
    })
}

/// Decode categories from a JSON array
pub fn parse_categories(content: &str) -> LedgerResult<Parsed<Category>> {
    decode_each(content, |raw| {
        let record: CategoryIn = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        Ok(Category::from_parts(
            CategoryId::from(require_id(&record.id, "id")?),
            record.category_type,
            record.name.trim(),
        ))
    })
}

/// Decode operations from a JSON array
///
/// The amount may be a number or a quoted string; older exports quoted it.
pub fn parse_operations(content: &str) -> LedgerResult<Parsed<Operation>> {
    decode_each(content, |raw| {
        let record: OperationIn = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        Ok(Operation::from_parts(
            OperationId::from(require_id(&record.id, "id")?),
            record.operation_type,
            AccountId::from(record.bank_account_id.trim()),
            decimal_from_raw(&record.amount)?,
            record.date,
            CategoryId::from(record.category_id.trim()),
            record.description,
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_account_export_layout() {
        let accounts = vec![Account::from_parts(AccountId::from("a1"), "Main", dec("1000.00"))];
        let json = export_accounts(&accounts).unwrap();

        assert!(json.starts_with('['));
        assert!(json.contains("\"balance\": 1000.00"));
        let id_pos = json.find("\"id\"").unwrap();
        let name_pos = json.find("\"name\"").unwrap();
        let balance_pos = json.find("\"balance\"").unwrap();
        assert!(id_pos < name_pos && name_pos < balance_pos);
    }

    #[test]
    fn test_operation_export_key_order() {
        let op = Operation::from_parts(
            OperationId::from("o1"),
            OperationType::Expense,
            AccountId::from("a1"),
            dec("12.5"),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            CategoryId::from("c1"),
            Some("say \"hi\"".into()),
        );
        let json = export_operations(&[op]).unwrap();

        let keys = ["\"id\"", "\"type\"", "\"bankAccountId\"", "\"amount\"", "\"date\"", "\"description\"", "\"categoryId\""];
        let positions: Vec<_> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"amount\": 12.5"));
        assert!(json.contains("\"date\": \"2025-02-03\""));
        assert!(json.contains("say \\\"hi\\\""));
    }

    #[test]
    fn test_parse_accepts_quoted_amount_and_any_key_order() {
        let content = r#"[
            {"id": "o1", "type": "INCOME", "bankAccountId": "a1", "amount": "99.90",
             "date": "2025-01-15", "categoryId": "c1", "description": "bonus"}
        ]"#;
        let parsed = parse_operations(content).unwrap();

        assert_eq!(parsed.records.len(), 1);
        let op = &parsed.records[0];
        assert_eq!(op.amount, dec("99.90"));
        assert_eq!(op.category_id.as_str(), "c1");
        assert_eq!(op.description, "bonus");
    }

    #[test]
    fn test_malformed_element_is_skipped() {
        let content = r#"[
            {"id": "c1", "type": "EXPENSE", "name": "Food"},
            {"id": "c2", "type": "SOMETHING", "name": "Bad"},
            {"id": "c3", "type": "INCOME", "name": "Salary"}
        ]"#;
        let parsed = parse_categories(content).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line, 2);
    }

    #[test]
    fn test_non_array_blob_is_format_error() {
        assert!(parse_accounts("{\"id\": \"a1\"}").unwrap_err().is_format());
        assert!(parse_accounts("[{\"id\": ").unwrap_err().is_format());
    }

    #[test]
    fn test_balance_beyond_precision_is_skipped() {
        let content = r#"[
            {"id": "a1", "name": "Main", "balance": 1.000000000000000000000000000001},
            {"id": "a2", "name": "Spare", "balance": 10}
        ]"#;
        let parsed = parse_accounts(content).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].id.as_str(), "a2");
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line, 1);
        assert!(parsed.skipped[0].reason.contains("precision"));
    }

    #[test]
    fn test_empty_description_gets_placeholder() {
        let content = r#"[
            {"id": "o1", "type": "EXPENSE", "bankAccountId": "a1", "amount": 5,
             "date": "2025-01-15", "description": "", "categoryId": "c1"},
            {"id": "o2", "type": "EXPENSE", "bankAccountId": "a1", "amount": 5,
             "date": "2025-01-15", "description": "   ", "categoryId": "c1"}
        ]"#;
        let parsed = parse_operations(content).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert!(parsed
            .records
            .iter()
            .all(|op| op.description == crate::models::NO_DESCRIPTION));
    }

    #[test]
    fn test_decimal_from_raw_variants() {
        let raw = RawValue::from_string("1e2".into()).unwrap();
        assert_eq!(decimal_from_raw(&raw).unwrap(), Decimal::from(100));

        let raw = RawValue::from_string("\"abc\"".into()).unwrap();
        assert!(decimal_from_raw(&raw).is_err());
    }
}
