//! Account facade
//!
//! Creation goes through the factory; everything else is a thin pass-through
//! to the account repository. Balances are never edited here.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::factories::AccountFactory;
use crate::models::{Account, AccountId};
use crate::storage::Storage;

/// Facade for account management
pub struct AccountFacade<'a> {
    storage: &'a Storage,
    factory: AccountFactory,
}

impl<'a> AccountFacade<'a> {
    /// Create a new account facade
    pub fn new(storage: &'a Storage, factory: AccountFactory) -> Self {
        Self { storage, factory }
    }

    /// Create and persist a new account
    pub fn create(&self, name: &str, balance: Option<Decimal>) -> LedgerResult<Account> {
        let account = self.factory.create(name, balance)?;
        self.storage.accounts.save(account.clone())?;

        debug!(account_id = %account.id, name = %account.name, "created account");
        Ok(account)
    }

    /// Get an account by ID
    pub fn get_by_id(&self, id: &AccountId) -> LedgerResult<Option<Account>> {
        self.storage.accounts.find_by_id(id)
    }

    /// Find an account by ID string or by name (case-insensitive)
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Account>> {
        if let Some(id) = AccountId::parse(identifier) {
            if let Some(account) = self.storage.accounts.find_by_id(&id)? {
                return Ok(Some(account));
            }
        }

        let needle = identifier.trim().to_lowercase();
        Ok(self
            .storage
            .accounts
            .find_all()?
            .into_iter()
            .find(|a| a.name.to_lowercase() == needle))
    }

    /// Get all accounts, sorted by name for display
    pub fn list(&self) -> LedgerResult<Vec<Account>> {
        let mut accounts = self.storage.accounts.find_all()?;
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(accounts)
    }

    /// Persist an edited account
    ///
    /// Only the name is revalidated; the balance is owned by the operation
    /// facade and is stored as given. Acts as an upsert, so import uses it to
    /// store decoded accounts under their original ids.
    pub fn update(&self, mut account: Account) -> LedgerResult<()> {
        let name = account.name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "Account name cannot be empty".into(),
            ));
        }
        account.name = name.to_string();

        self.storage.accounts.save(account)
    }

    /// Delete an account; missing ids are ignored
    pub fn delete(&self, id: &AccountId) -> LedgerResult<bool> {
        self.storage.accounts.delete(id)
    }
}
