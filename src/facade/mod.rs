//! Facade layer for the ledger
//!
//! Facades are the API surface per entity type. They hold no state of their
//! own: each call goes factory -> repository, and the operation facade also
//! maintains the cross-entity balance invariant.

pub mod account;
pub mod category;
pub mod operation;

pub use account::AccountFacade;
pub use category::CategoryFacade;
pub use operation::OperationFacade;
