//! Operation facade
//!
//! Creates incomes and expenses and keeps the referenced account's balance
//! equal to its starting balance plus the signed sum of applied operations.
//!
//! The balance protocol is:
//!
//! 1. validate all fields through the factory;
//! 2. check the account exists, before anything is persisted;
//! 3. persist the operation;
//! 4. add the signed delta to the account under one repository write lock.
//!
//! If step 4 fails, because the account disappeared after step 2 or the new
//! balance is out of range, the operation persisted in step 3 is removed
//! again before the error is returned.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::factories::OperationFactory;
use crate::models::{Account, AccountId, Operation, OperationId, OperationType};
use crate::storage::Storage;

/// Facade for operation management
pub struct OperationFacade<'a> {
    storage: &'a Storage,
    factory: OperationFactory,
}

impl<'a> OperationFacade<'a> {
    /// Create a new operation facade
    pub fn new(storage: &'a Storage, factory: OperationFactory) -> Self {
        Self { storage, factory }
    }

    /// Record an expense and decrease the account balance by `amount`
    pub fn create_expense(
        &self,
        account_id: &str,
        amount: Option<Decimal>,
        category_id: &str,
        description: Option<&str>,
    ) -> LedgerResult<Operation> {
        self.create(OperationType::Expense, account_id, amount, category_id, description)
    }

    /// Record an income and increase the account balance by `amount`
    pub fn create_income(
        &self,
        account_id: &str,
        amount: Option<Decimal>,
        category_id: &str,
        description: Option<&str>,
    ) -> LedgerResult<Operation> {
        self.create(OperationType::Income, account_id, amount, category_id, description)
    }

    fn create(
        &self,
        operation_type: OperationType,
        account_id: &str,
        amount: Option<Decimal>,
        category_id: &str,
        description: Option<&str>,
    ) -> LedgerResult<Operation> {
        let mut operation =
            self.factory
                .create(Some(operation_type), account_id, amount, category_id)?;
        operation.set_description(description);

        self.apply(operation)
    }

    /// Persist an already-built operation and apply its balance delta
    ///
    /// Used to replay imported history through the same protocol as freshly
    /// created operations.
    pub fn replay(&self, operation: Operation) -> LedgerResult<Operation> {
        operation
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.apply(operation)
    }

    /// Persist an operation as settled history, leaving balances untouched
    pub fn restore(&self, operation: Operation) -> LedgerResult<()> {
        operation
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.operations.save(operation)
    }

    fn apply(&self, operation: Operation) -> LedgerResult<Operation> {
        if !self.storage.accounts.exists(&operation.bank_account_id)? {
            return Err(LedgerError::account_not_found(
                operation.bank_account_id.to_string(),
            ));
        }

        self.storage.operations.save(operation.clone())?;

        if let Err(err) = self.update_account_balance(&operation.bank_account_id, operation.signed_amount()) {
            warn!(
                operation_id = %operation.id,
                error = %err,
                "balance update failed, removing operation"
            );
            self.storage.operations.delete(&operation.id)?;
            return Err(err);
        }

        debug!(
            operation_id = %operation.id,
            account_id = %operation.bank_account_id,
            kind = %operation.operation_type,
            amount = %operation.amount,
            "applied operation"
        );
        Ok(operation)
    }

    fn update_account_balance(&self, account_id: &AccountId, delta: Decimal) -> LedgerResult<Account> {
        self.storage
            .accounts
            .update_with(account_id, |account| account.apply_delta(delta))
    }

    /// Get an operation by ID
    pub fn get_by_id(&self, id: &OperationId) -> LedgerResult<Option<Operation>> {
        self.storage.operations.find_by_id(id)
    }

    /// Get all operations, oldest first
    pub fn list(&self) -> LedgerResult<Vec<Operation>> {
        let mut operations = self.storage.operations.find_all()?;
        operations.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(operations)
    }

    /// Get the operations recorded against one account, oldest first
    pub fn list_by_account(&self, account_id: &AccountId) -> LedgerResult<Vec<Operation>> {
        let mut operations = self.list()?;
        operations.retain(|op| &op.bank_account_id == account_id);
        Ok(operations)
    }

    /// Delete an operation record; the account balance is not reverted
    pub fn delete(&self, id: &OperationId) -> LedgerResult<bool> {
        self.storage.operations.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factories::AccountFactory;
    use crate::models::{CategoryId, NO_DESCRIPTION};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn setup(balance: i64) -> (Storage, Account) {
        let storage = Storage::new();
        let account = AccountFactory::new()
            .create("Main", Some(Decimal::from(balance)))
            .unwrap();
        storage.accounts.save(account.clone()).unwrap();
        (storage, account)
    }

    fn balance_of(storage: &Storage, id: &AccountId) -> Decimal {
        storage.accounts.find_by_id(id).unwrap().unwrap().balance
    }

    #[test]
    fn test_expense_decreases_balance() {
        let (storage, account) = setup(1000);
        let facade = OperationFacade::new(&storage, OperationFactory::new());

        let op = facade
            .create_expense(account.id.as_str(), Some(Decimal::from(500)), "food", Some("lunch"))
            .unwrap();

        assert_eq!(op.operation_type, OperationType::Expense);
        assert_eq!(op.amount, Decimal::from(500));
        assert_eq!(op.description, "lunch");
        assert_eq!(balance_of(&storage, &account.id), Decimal::from(500));
    }

    #[test]
    fn test_income_increases_balance() {
        let (storage, account) = setup(100);
        let facade = OperationFacade::new(&storage, OperationFactory::new());

        let amount = Decimal::from_str("0.75").unwrap();
        let op = facade
            .create_income(account.id.as_str(), Some(amount), "salary", None)
            .unwrap();

        assert_eq!(op.description, NO_DESCRIPTION);
        assert_eq!(balance_of(&storage, &account.id), Decimal::from_str("100.75").unwrap());
    }

    #[test]
    fn test_invalid_amount_leaves_ledger_untouched() {
        let (storage, account) = setup(100);
        let facade = OperationFacade::new(&storage, OperationFactory::new());

        for amount in [Decimal::ZERO, Decimal::from(-5)] {
            let err = facade
                .create_expense(account.id.as_str(), Some(amount), "food", None)
                .unwrap_err();
            assert!(err.is_validation());
        }

        assert_eq!(storage.operations.count().unwrap(), 0);
        assert_eq!(balance_of(&storage, &account.id), Decimal::from(100));
    }

    #[test]
    fn test_invalid_income_amount_leaves_ledger_untouched() {
        let (storage, account) = setup(100);
        let facade = OperationFacade::new(&storage, OperationFactory::new());

        for amount in [Decimal::ZERO, Decimal::from(-5), Decimal::from_str("-0.01").unwrap()] {
            let err = facade
                .create_income(account.id.as_str(), Some(amount), "salary", None)
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(facade
            .create_income(account.id.as_str(), None, "salary", None)
            .unwrap_err()
            .is_validation());

        assert_eq!(storage.operations.count().unwrap(), 0);
        assert_eq!(balance_of(&storage, &account.id), Decimal::from(100));
    }

    #[test]
    fn test_balance_overflow_rolls_back_operation() {
        let storage = Storage::new();
        let account = AccountFactory::new()
            .create("Full", Some(Decimal::MAX))
            .unwrap();
        storage.accounts.save(account.clone()).unwrap();
        let facade = OperationFacade::new(&storage, OperationFactory::new());

        let err = facade
            .create_income(account.id.as_str(), Some(Decimal::ONE), "salary", None)
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(storage.operations.count().unwrap(), 0);
        assert_eq!(balance_of(&storage, &account.id), Decimal::MAX);

        // The account stays usable afterwards
        facade
            .create_expense(account.id.as_str(), Some(Decimal::ONE), "food", None)
            .unwrap();
        assert_eq!(balance_of(&storage, &account.id), Decimal::MAX - Decimal::ONE);
        assert_eq!(storage.accounts.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_account_is_not_found_and_nothing_persisted() {
        let (storage, _) = setup(100);
        let facade = OperationFacade::new(&storage, OperationFactory::new());

        let err = facade
            .create_expense("no-such-account", Some(Decimal::ONE), "food", None)
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(storage.operations.count().unwrap(), 0);
    }

    #[test]
    fn test_replay_and_restore() {
        let (storage, account) = setup(50);
        let facade = OperationFacade::new(&storage, OperationFactory::new());
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let settled = Operation::from_parts(
            OperationId::from("op-settled"),
            OperationType::Income,
            account.id.clone(),
            Decimal::from(10),
            date,
            CategoryId::from("c"),
            None,
        );
        facade.restore(settled).unwrap();
        assert_eq!(balance_of(&storage, &account.id), Decimal::from(50));

        let replayed = Operation::from_parts(
            OperationId::from("op-replayed"),
            OperationType::Expense,
            account.id.clone(),
            Decimal::from(20),
            date,
            CategoryId::from("c"),
            None,
        );
        facade.replay(replayed).unwrap();
        assert_eq!(balance_of(&storage, &account.id), Decimal::from(30));
        assert_eq!(facade.list_by_account(&account.id).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_keeps_balance() {
        let (storage, account) = setup(10);
        let facade = OperationFacade::new(&storage, OperationFactory::new());

        let op = facade
            .create_income(account.id.as_str(), Some(Decimal::from(5)), "c", None)
            .unwrap();
        assert!(facade.delete(&op.id).unwrap());
        assert!(facade.get_by_id(&op.id).unwrap().is_none());
        assert_eq!(balance_of(&storage, &account.id), Decimal::from(15));
    }
}
