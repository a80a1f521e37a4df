//! In-memory keyed repository
//!
//! One generic store serves every entity type. Records are keyed by their
//! identity, so a second record under the same id replaces the first.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountId, Category, CategoryId, Operation, OperationId};

/// An entity that can live in a repository
pub trait Record: Clone {
    /// Identity type used as the storage key
    type Id: Clone + Eq + Hash + fmt::Display;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    /// The record's identity
    fn id(&self) -> &Self::Id;
}

impl Record for Account {
    type Id = AccountId;
    const ENTITY: &'static str = "Account";

    fn id(&self) -> &AccountId {
        &self.id
    }
}

impl Record for Category {
    type Id = CategoryId;
    const ENTITY: &'static str = "Category";

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

impl Record for Operation {
    type Id = OperationId;
    const ENTITY: &'static str = "Operation";

    fn id(&self) -> &OperationId {
        &self.id
    }
}

/// Repository holding the canonical copy of each record
pub struct MemoryRepository<E: Record> {
    data: RwLock<HashMap<E::Id, E>>,
}

impl<E: Record> MemoryRepository<E> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, HashMap<E::Id, E>>> {
        self.data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, HashMap<E::Id, E>>> {
        self.data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Insert or overwrite a record under its id
    pub fn save(&self, entity: E) -> LedgerResult<()> {
        let mut data = self.write()?;
        data.insert(entity.id().clone(), entity);
        Ok(())
    }

    /// Get a record by id
    pub fn find_by_id(&self, id: &E::Id) -> LedgerResult<Option<E>> {
        let data = self.read()?;
        Ok(data.get(id).cloned())
    }

    /// Get all records, in no particular order
    pub fn find_all(&self) -> LedgerResult<Vec<E>> {
        let data = self.read()?;
        Ok(data.values().cloned().collect())
    }

    /// Remove a record; absent ids are not an error
    pub fn delete(&self, id: &E::Id) -> LedgerResult<bool> {
        let mut data = self.write()?;
        Ok(data.remove(id).is_some())
    }

    /// Check if a record exists
    pub fn exists(&self, id: &E::Id) -> LedgerResult<bool> {
        let data = self.read()?;
        Ok(data.contains_key(id))
    }

    /// Count records
    pub fn count(&self) -> LedgerResult<usize> {
        let data = self.read()?;
        Ok(data.len())
    }

    /// Modify a stored record under a single write lock
    ///
    /// The closure works on a copy; the stored record is replaced only when it
    /// returns `Ok`. Returns the updated copy, or `NotFound` when no record has
    /// this id.
    pub fn update_with<F>(&self, id: &E::Id, f: F) -> LedgerResult<E>
    where
        F: FnOnce(&mut E) -> LedgerResult<()>,
    {
        let mut data = self.write()?;
        let entity = data.get_mut(id).ok_or_else(|| LedgerError::NotFound {
            entity_type: E::ENTITY,
            identifier: id.to_string(),
        })?;

        let mut updated = entity.clone();
        f(&mut updated)?;
        *entity = updated.clone();
        Ok(updated)
    }
}

impl<E: Record> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}
