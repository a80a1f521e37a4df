//! Explicit wiring of storage, factories and facades
//!
//! A `Ledger` owns the session's repositories. Facades borrow it per call,
//! so they never outlive or cache the state they operate on.

use crate::error::LedgerResult;
use crate::facade::{AccountFacade, CategoryFacade, OperationFacade};
use crate::factories::{AccountFactory, CategoryFactory, OperationFactory};
use crate::storage::Storage;

/// The combined state of accounts, categories and operations
#[derive(Default)]
pub struct Ledger {
    storage: Storage,
    account_factory: AccountFactory,
    category_factory: CategoryFactory,
    operation_factory: OperationFactory,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Account facade bound to this ledger
    pub fn accounts(&self) -> AccountFacade<'_> {
        AccountFacade::new(&self.storage, self.account_factory)
    }

    /// Category facade bound to this ledger
    pub fn categories(&self) -> CategoryFacade<'_> {
        CategoryFacade::new(&self.storage, self.category_factory)
    }

    /// Operation facade bound to this ledger
    pub fn operations(&self) -> OperationFacade<'_> {
        OperationFacade::new(&self.storage, self.operation_factory)
    }

    /// Record counts as (accounts, categories, operations)
    pub fn counts(&self) -> LedgerResult<(usize, usize, usize)> {
        Ok((
            self.storage.accounts.count()?,
            self.storage.categories.count()?,
            self.storage.operations.count()?,
        ))
    }
}
