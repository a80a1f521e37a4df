//! Storage layer for the ledger
//!
//! Session-scoped in-memory repositories, one per entity type. Nothing here
//! is written to disk; export files are produced by the codec layer on
//! request.

pub mod memory;

pub use memory::{MemoryRepository, Record};

use crate::models::{Account, Category, Operation};

/// Repository of accounts
pub type AccountRepository = MemoryRepository<Account>;
/// Repository of categories
pub type CategoryRepository = MemoryRepository<Category>;
/// Repository of operations
pub type OperationRepository = MemoryRepository<Operation>;

/// Main storage coordinator that provides access to all repositories
#[derive(Default)]
pub struct Storage {
    pub accounts: AccountRepository,
    pub categories: CategoryRepository,
    pub operations: OperationRepository,
}

impl Storage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_creation() {
        let storage = Storage::new();
        assert_eq!(storage.accounts.count().unwrap(), 0);
        assert_eq!(storage.categories.count().unwrap(), 0);
        assert_eq!(storage.operations.count().unwrap(), 0);
    }
}
