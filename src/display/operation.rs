//! Operation display formatting
//!
//! Operations are shown with their account and category names resolved
//! where the referenced record still exists; otherwise the raw id is shown.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Account, Category, Operation};

#[derive(Tabled)]
struct OperationRow<'a> {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Account")]
    account: &'a str,
    #[tabled(rename = "Category")]
    category: &'a str,
    #[tabled(rename = "Amount")]
    amount: Decimal,
    #[tabled(rename = "Description")]
    description: &'a str,
    #[tabled(rename = "ID")]
    id: &'a str,
}

/// Format a list of operations as a table
pub fn format_operation_list(
    operations: &[Operation],
    accounts: &[Account],
    categories: &[Category],
) -> String {
    if operations.is_empty() {
        return "No operations found.\n".to_string();
    }

    let account_names: HashMap<_, _> = accounts
        .iter()
        .map(|a| (a.id.as_str(), a.name.as_str()))
        .collect();
    let category_names: HashMap<_, _> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let rows = operations.iter().map(|op| OperationRow {
        date: op.date.format("%Y-%m-%d").to_string(),
        kind: op.operation_type.as_str(),
        account: account_names
            .get(op.bank_account_id.as_str())
            .copied()
            .unwrap_or(op.bank_account_id.as_str()),
        category: category_names
            .get(op.category_id.as_str())
            .copied()
            .unwrap_or(op.category_id.as_str()),
        amount: op.signed_amount(),
        description: &op.description,
        id: op.id.as_str(),
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, CategoryId, OperationId, OperationType};
    use chrono::NaiveDate;

    #[test]
    fn test_names_are_resolved() {
        let account = Account::from_parts(AccountId::from("a1"), "Main", Decimal::ZERO);
        let op = Operation::from_parts(
            OperationId::from("o1"),
            OperationType::Expense,
            AccountId::from("a1"),
            Decimal::from(12),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            CategoryId::from("gone"),
            None,
        );

        let output = format_operation_list(&[op], &[account], &[]);
        assert!(output.contains("Main"));
        assert!(output.contains("gone"));
        assert!(output.contains("-12"));
        assert!(output.contains("2025-03-01"));
    }
}
