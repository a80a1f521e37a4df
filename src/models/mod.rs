//! Core data models for the ledger
//!
//! Passive records with identity and validated fields: accounts, categories
//! and the income/expense operations that move account balances.

pub mod account;
pub mod category;
pub mod ids;
pub mod operation;

pub use account::{Account, AccountValidationError};
pub use category::{Category, CategoryValidationError, OperationType};
pub use ids::{AccountId, CategoryId, OperationId};
pub use operation::{Operation, OperationValidationError, NO_DESCRIPTION};
