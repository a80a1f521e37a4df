//! Account model
//!
//! Represents a monetary account whose balance tracks the operations applied
//! against it.

use rust_decimal::Decimal;
use std::fmt;

use super::ids::AccountId;
use crate::error::{LedgerError, LedgerResult};

/// A monetary account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Display name (non-empty after trim)
    pub name: String,

    /// Current balance, exact decimal
    pub balance: Decimal,
}

impl Account {
    /// Build an account from already-known parts (e.g. a decoded import record)
    pub fn from_parts(id: AccountId, name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
        }
    }

    /// Add a signed delta to the balance
    ///
    /// Fails without touching the balance when the sum is out of range.
    pub fn apply_delta(&mut self, delta: Decimal) -> LedgerResult<()> {
        self.balance = self.balance.checked_add(delta).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Balance of account {} would overflow applying {}",
                self.id, delta
            ))
        })?;
        Ok(())
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.id.is_blank() {
            return Err(AccountValidationError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyId,
    EmptyName,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Account id cannot be empty"),
            Self::EmptyName => write!(f, "Account name cannot be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}
