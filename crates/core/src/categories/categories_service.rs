//! Category service implementation.

use log::debug;
use std::sync::Arc;

use async_trait::async_trait;

use super::categories_model::{Category, CategoryUpdate, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Service for managing categories.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }

    /// Checks that `parent_id` names an existing top-level category.
    fn validate_parent(&self, parent_id: &str) -> Result<()> {
        let parent = self.repository.get_by_id(parent_id)?.ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Parent category '{}' not found",
                parent_id
            )))
        })?;
        if parent.parent_id.is_some() {
            return Err(Error::ConstraintViolation(
                "Categories can be nested at most one level deep".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        if let Some(parent_id) = &new_category.parent_id {
            self.validate_parent(parent_id)?;
        }
        debug!("Creating category: {}", new_category.name);
        self.repository.create(new_category).await
    }

    async fn update_category(&self, category_update: CategoryUpdate) -> Result<Category> {
        category_update.validate()?;
        let id = category_update.id.clone().unwrap_or_default();
        if let Some(parent_id) = &category_update.parent_id {
            self.validate_parent(parent_id)?;
            // A category that already has children must stay at the top level.
            if self.repository.has_children(&id)? {
                return Err(Error::ConstraintViolation(
                    "Category with subcategories cannot be assigned a parent".to_string(),
                ));
            }
        }
        self.repository.update(category_update).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        debug!("Deleting category: {}", category_id);
        let deleted = self.repository.delete(category_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Category '{}' not found",
                category_id
            ))));
        }
        Ok(())
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository.get_by_id(category_id)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!(
                "Category '{}' not found",
                category_id
            )))
        })
    }

    fn list_categories(&self, is_active_filter: Option<bool>) -> Result<Vec<Category>> {
        self.repository.list(is_active_filter)
    }
}
