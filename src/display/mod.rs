//! Display formatting for terminal output
//!
//! Renders ledger records as `tabled` tables for the list commands.

pub mod account;
pub mod category;
pub mod operation;

pub use account::format_account_list;
pub use category::format_category_list;
pub use operation::format_operation_list;
