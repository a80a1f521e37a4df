//! Category facade

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::factories::CategoryFactory;
use crate::models::{Category, CategoryId, OperationType};
use crate::storage::Storage;

/// Facade for category management
pub struct CategoryFacade<'a> {
    storage: &'a Storage,
    factory: CategoryFactory,
}

impl<'a> CategoryFacade<'a> {
    /// Create a new category facade
    pub fn new(storage: &'a Storage, factory: CategoryFactory) -> Self {
        Self { storage, factory }
    }

    /// Create and persist a new category
    pub fn create(&self, category_type: Option<OperationType>, name: &str) -> LedgerResult<Category> {
        let category = self.factory.create(category_type, name)?;
        self.storage.categories.save(category.clone())?;

        debug!(category_id = %category.id, name = %category.name, "created category");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get_by_id(&self, id: &CategoryId) -> LedgerResult<Option<Category>> {
        self.storage.categories.find_by_id(id)
    }

    /// Find a category by ID string or by name (case-insensitive)
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Category>> {
        if let Some(id) = CategoryId::parse(identifier) {
            if let Some(category) = self.storage.categories.find_by_id(&id)? {
                return Ok(Some(category));
            }
        }

        let needle = identifier.trim().to_lowercase();
        Ok(self
            .storage
            .categories
            .find_all()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == needle))
    }

    /// Get all categories, sorted by type then name
    pub fn list(&self) -> LedgerResult<Vec<Category>> {
        let mut categories = self.storage.categories.find_all()?;
        categories.sort_by(|a, b| {
            a.category_type
                .as_str()
                .cmp(b.category_type.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    /// Get the categories of one type
    pub fn list_by_type(&self, category_type: OperationType) -> LedgerResult<Vec<Category>> {
        let mut categories = self.list()?;
        categories.retain(|c| c.category_type == category_type);
        Ok(categories)
    }

    /// Persist an edited category after revalidating its name
    pub fn update(&self, mut category: Category) -> LedgerResult<()> {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        category.name = name.to_string();

        self.storage.categories.save(category)
    }

    /// Delete a category; missing ids are ignored
    pub fn delete(&self, id: &CategoryId) -> LedgerResult<bool> {
        self.storage.categories.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facade(storage: &Storage) -> CategoryFacade<'_> {
        CategoryFacade::new(storage, CategoryFactory::new())
    }

    #[test]
    fn test_create_and_get() {
        let storage = Storage::new();
        let service = facade(&storage);

        let category = service.create(Some(OperationType::Income), "Salary").unwrap();
        let stored = service.get_by_id(&category.id).unwrap().unwrap();
        assert_eq!(stored, category);
    }

    #[test]
    fn test_list_by_type() {
        let storage = Storage::new();
        let service = facade(&storage);

        service.create(Some(OperationType::Income), "Salary").unwrap();
        service.create(Some(OperationType::Expense), "Food").unwrap();
        service.create(Some(OperationType::Expense), "Transport").unwrap();

        assert_eq!(service.list().unwrap().len(), 3);
        let expenses = service.list_by_type(OperationType::Expense).unwrap();
        let names: Vec<_> = expenses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Transport"]);
    }

    #[test]
    fn test_update_revalidates_name() {
        let storage = Storage::new();
        let service = facade(&storage);

        let mut category = service.create(Some(OperationType::Expense), "Food").unwrap();
        category.name = "Groceries".into();
        service.update(category.clone()).unwrap();
        assert_eq!(service.find("groceries").unwrap().unwrap().id, category.id);

        category.name = String::new();
        assert!(service.update(category).unwrap_err().is_validation());
    }

    #[test]
    fn test_delete() {
        let storage = Storage::new();
        let service = facade(&storage);

        let category = service.create(Some(OperationType::Expense), "Food").unwrap();
        service.delete(&category.id).unwrap();
        assert!(service.get_by_id(&category.id).unwrap().is_none());
    }
}
