//! Operation model
//!
//! An operation is a single income or expense against one account. The
//! stored amount is always a positive magnitude; the direction lives in
//! `operation_type`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

use super::category::OperationType;
use super::ids::{AccountId, CategoryId, OperationId};

/// Text stored when an operation is created without a description
pub const NO_DESCRIPTION: &str = "No description";

/// A financial operation (income or expense)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Unique identifier
    pub id: OperationId,

    /// Income or expense
    pub operation_type: OperationType,

    /// The account this operation moves money in or out of
    pub bank_account_id: AccountId,

    /// Positive magnitude of the operation
    pub amount: Decimal,

    /// Date the operation occurred
    pub date: NaiveDate,

    /// Category reference (not checked for existence)
    pub category_id: CategoryId,

    /// Free text; `NO_DESCRIPTION` when none was given
    pub description: String,
}

impl Operation {
    /// Build an operation from already-known parts (e.g. a decoded import record)
    ///
    /// A missing or blank description becomes [`NO_DESCRIPTION`]; other text
    /// is kept verbatim.
    pub fn from_parts(
        id: OperationId,
        operation_type: OperationType,
        bank_account_id: AccountId,
        amount: Decimal,
        date: NaiveDate,
        category_id: CategoryId,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            operation_type,
            bank_account_id,
            amount,
            date,
            category_id,
            description: description
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }

    /// Replace the description, falling back to the placeholder for blank text
    pub fn set_description(&mut self, description: Option<&str>) {
        self.description = match description.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_DESCRIPTION.to_string(),
        };
    }

    /// The balance change this operation causes on its account
    pub fn signed_amount(&self) -> Decimal {
        match self.operation_type {
            OperationType::Income => self.amount,
            OperationType::Expense => -self.amount,
        }
    }

    /// Validate the operation
    pub fn validate(&self) -> Result<(), OperationValidationError> {
        if self.id.is_blank() {
            return Err(OperationValidationError::EmptyId);
        }

        if self.amount <= Decimal::ZERO {
            return Err(OperationValidationError::NonPositiveAmount(self.amount));
        }

        if self.bank_account_id.is_blank() {
            return Err(OperationValidationError::MissingAccount);
        }

        if self.category_id.is_blank() {
            return Err(OperationValidationError::MissingCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.operation_type, self.amount, self.description
        )
    }
}

/// Validation errors for operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationValidationError {
    EmptyId,
    NonPositiveAmount(Decimal),
    MissingAccount,
    MissingCategory,
}

impl fmt::Display for OperationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Operation id cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Operation amount must be greater than zero, got {}", amount)
            }
            Self::MissingAccount => write!(f, "Operation account id cannot be empty"),
            Self::MissingCategory => write!(f, "Operation category id cannot be empty"),
        }
    }
}

impl std::error::Error for OperationValidationError {}
