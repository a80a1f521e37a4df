//! finance-ledger - in-memory personal finance ledger
//!
//! Tracks bank accounts, income/expense categories and the operations that
//! move money between them, and exchanges each entity list with JSON and
//! CSV files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (accounts, categories, operations)
//! - `factories`: Validating constructors for fresh records
//! - `storage`: Session-scoped in-memory repositories
//! - `facade`: Use-case entry points, including the balance-keeping protocol
//! - `ledger`: Explicit wiring of storage, factories and facades
//! - `codec`: JSON and CSV import/export
//! - `config`: Configuration and path management
//! - `cli` / `display`: The interactive session front end
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_ledger::ledger::Ledger;
//! use rust_decimal::Decimal;
//!
//! let ledger = Ledger::new();
//! let main = ledger.accounts().create("Main", Some(Decimal::from(1000)))?;
//! ledger.operations().create_expense(main.id.as_str(), Some(Decimal::from(500)), "food", Some("lunch"))?;
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod facade;
pub mod factories;
pub mod ledger;
pub mod models;
pub mod storage;

pub use error::LedgerError;
pub use ledger::Ledger;
