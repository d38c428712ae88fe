//! Category repository and service traits.

use async_trait::async_trait;

use super::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;

/// Trait defining the contract for Category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Creates a new category.
    async fn create(&self, new_category: NewCategory) -> Result<Category>;

    /// Updates an existing category.
    async fn update(&self, category_update: CategoryUpdate) -> Result<Category>;

    /// Deletes a category by its ID.
    ///
    /// Transactions referencing the category keep working with the category
    /// cleared; budgets for the category are removed; child categories are
    /// detached. Returns the number of deleted records.
    async fn delete(&self, category_id: &str) -> Result<usize>;

    /// Retrieves a category by its ID, or None if it does not exist.
    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>>;

    /// Lists categories ordered by name, optionally filtered by active status.
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Category>>;

    /// Returns true if any category has the given category as its parent.
    fn has_children(&self, category_id: &str) -> Result<bool>;
}

/// Trait defining the contract for Category service operations.
///
/// The service enforces the single-level hierarchy rule before any
/// write reaches the repository.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Creates a new category with business validation.
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Updates an existing category with business validation.
    async fn update_category(&self, category_update: CategoryUpdate) -> Result<Category>;

    /// Deletes a category and detaches everything that referenced it.
    async fn delete_category(&self, category_id: &str) -> Result<()>;

    /// Retrieves a category by ID.
    fn get_category(&self, category_id: &str) -> Result<Category>;

    /// Lists categories, optionally filtered by active status.
    fn list_categories(&self, is_active_filter: Option<bool>) -> Result<Vec<Category>>;
}
