//! Account display formatting

use rust_decimal::Decimal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Account;

#[derive(Tabled)]
struct AccountRow<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Balance")]
    balance: Decimal,
}

/// Format a list of accounts as a table with a total line
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let rows = accounts.iter().map(|a| AccountRow {
        id: a.id.as_str(),
        name: &a.name,
        balance: a.balance,
    });
    let total: Decimal = accounts.iter().map(|a| a.balance).sum();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push_str(&format!("\nTotal: {}\n", total));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[]), "No accounts found.\n");
    }

    #[test]
    fn test_list_shows_rows_and_total() {
        let accounts = vec![
            Account::from_parts(AccountId::from("a1"), "Main", Decimal::new(100050, 2)),
            Account::from_parts(AccountId::from("a2"), "Cash", Decimal::new(-50, 2)),
        ];
        let output = format_account_list(&accounts);

        assert!(output.contains("Main"));
        assert!(output.contains("1000.50"));
        assert!(output.contains("Total: 1000.00"));
    }
}
