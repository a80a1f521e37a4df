//! Validating factories
//!
//! Factories are the only place new entities get an identity. They check
//! every input invariant before building the record and never touch storage.

use chrono::Local;
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Operation, OperationId, OperationType,
};

fn require_name(name: &str, what: &str) -> LedgerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::Validation(format!("{} name cannot be empty", what)));
    }
    Ok(name.to_string())
}

/// Builds accounts with a fresh identity
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountFactory;

impl AccountFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create an account with the given starting balance
    pub fn create(&self, name: &str, balance: Option<Decimal>) -> LedgerResult<Account> {
        let balance = balance
            .ok_or_else(|| LedgerError::Validation("Account balance is required".into()))?;
        let name = require_name(name, "Account")?;

        Ok(Account::from_parts(AccountId::new(), name, balance))
    }
}

/// Builds categories with a fresh identity
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryFactory;

impl CategoryFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a category of the given type
    pub fn create(&self, category_type: Option<OperationType>, name: &str) -> LedgerResult<Category> {
        let category_type = category_type
            .ok_or_else(|| LedgerError::Validation("Category type is required".into()))?;
        let name = require_name(name, "Category")?;

        Ok(Category::from_parts(CategoryId::new(), category_type, name))
    }
}

/// Builds operations with a fresh identity, dated today
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationFactory;

impl OperationFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create an operation
    ///
    /// Zero and negative amounts are rejected for both types: the sign of a
    /// balance change comes from `operation_type`, never from the amount.
    pub fn create(
        &self,
        operation_type: Option<OperationType>,
        account_id: &str,
        amount: Option<Decimal>,
        category_id: &str,
    ) -> LedgerResult<Operation> {
        let amount =
            amount.ok_or_else(|| LedgerError::Validation("Operation amount is required".into()))?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "Operation amount must be greater than zero, got {}",
                amount
            )));
        }

        let account_id = AccountId::parse(account_id).ok_or_else(|| {
            LedgerError::Validation("Operation account id cannot be empty".into())
        })?;
        let category_id = CategoryId::parse(category_id).ok_or_else(|| {
            LedgerError::Validation("Operation category id cannot be empty".into())
        })?;
        let operation_type = operation_type
            .ok_or_else(|| LedgerError::Validation("Operation type is required".into()))?;

        Ok(Operation::from_parts(
            OperationId::new(),
            operation_type,
            account_id,
            amount,
            Local::now().date_naive(),
            category_id,
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NO_DESCRIPTION;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_create_account() {
        let factory = AccountFactory::new();
        let balance = Decimal::from_str("1000.00").unwrap();
        let account = factory.create("  Main ", Some(balance)).unwrap();

        assert_eq!(account.name, "Main");
        assert_eq!(account.balance, balance);
        assert!(!account.id.is_blank());
    }

    #[test]
    fn test_account_ids_are_unique() {
        let factory = AccountFactory::new();
        let ids: HashSet<_> = (0..100)
            .map(|i| factory.create(&format!("Acc {}", i), Some(Decimal::ZERO)).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_account_requires_balance_and_name() {
        let factory = AccountFactory::new();
        assert!(factory.create("Main", None).unwrap_err().is_validation());
        assert!(factory.create("   ", Some(Decimal::ONE)).unwrap_err().is_validation());
    }

    #[test]
    fn test_create_category() {
        let factory = CategoryFactory::new();
        let category = factory.create(Some(OperationType::Expense), "Food").unwrap();
        assert_eq!(category.category_type, OperationType::Expense);
        assert_eq!(category.name, "Food");

        assert!(factory.create(None, "Food").unwrap_err().is_validation());
        assert!(factory.create(Some(OperationType::Income), "").unwrap_err().is_validation());
    }

    #[test]
    fn test_create_operation() {
        let factory = OperationFactory::new();
        let op = factory
            .create(Some(OperationType::Income), "acc", Some(Decimal::from(250)), "cat")
            .unwrap();

        assert_eq!(op.amount, Decimal::from(250));
        assert_eq!(op.bank_account_id.as_str(), "acc");
        assert_eq!(op.category_id.as_str(), "cat");
        assert_eq!(op.date, Local::now().date_naive());
        assert_eq!(op.description, NO_DESCRIPTION);
    }

    #[test]
    fn test_operation_rejects_non_positive_amounts() {
        let factory = OperationFactory::new();
        for amount in ["0", "-0.01", "-100"] {
            let amount = Decimal::from_str(amount).unwrap();
            for kind in [OperationType::Income, OperationType::Expense] {
                let err = factory.create(Some(kind), "acc", Some(amount), "cat").unwrap_err();
                assert!(err.is_validation());
            }
        }

        let smallest = Decimal::from_str("0.01").unwrap();
        assert!(factory
            .create(Some(OperationType::Expense), "acc", Some(smallest), "cat")
            .is_ok());
    }

    #[test]
    fn test_operation_requires_references_and_type() {
        let factory = OperationFactory::new();
        let amount = Some(Decimal::ONE);

        assert!(factory.create(Some(OperationType::Expense), "", amount, "cat").is_err());
        assert!(factory.create(Some(OperationType::Expense), "acc", amount, " ").is_err());
        assert!(factory.create(None, "acc", amount, "cat").is_err());
        assert!(factory.create(Some(OperationType::Expense), "acc", None, "cat").is_err());
    }
}
