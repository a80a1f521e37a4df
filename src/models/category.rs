//! Category model and the shared income/expense type

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Direction of money movement, shared by categories and operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    /// Money coming into an account
    Income,
    /// Money leaving an account
    Expense,
}

impl OperationType {
    /// Canonical text form used by both codecs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Parse the canonical text form (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An income or expense category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Whether this category classifies income or expenses
    pub category_type: OperationType,

    /// Category name (non-empty after trim)
    pub name: String,
}

impl Category {
    /// Build a category from already-known parts
    pub fn from_parts(id: CategoryId, category_type: OperationType, name: impl Into<String>) -> Self {
        Self {
            id,
            category_type,
            name: name.into(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.id.is_blank() {
            return Err(CategoryValidationError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.category_type)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyId,
    EmptyName,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Category id cannot be empty"),
            Self::EmptyName => write!(f, "Category name cannot be empty"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
