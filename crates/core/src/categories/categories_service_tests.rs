//! Unit tests for the category service hierarchy rules.

use super::categories_model::{Category, CategoryUpdate, NewCategory, DEFAULT_CATEGORY_COLOR};
use super::categories_service::CategoryService;
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockCategoryRepository {
    categories: Vec<Category>,
}

impl MockCategoryRepository {
    fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for MockCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        Ok(Category {
            id: new_category.id.unwrap_or_else(|| "cat_created".to_string()),
            name: new_category.name,
            parent_id: new_category.parent_id,
            color: new_category.color,
            is_active: new_category.is_active,
            created_at: Utc::now().naive_utc(),
        })
    }

    async fn update(&self, category_update: CategoryUpdate) -> Result<Category> {
        let id = category_update.id.clone().unwrap_or_default();
        let existing = self
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(id)))?;
        Ok(Category {
            name: category_update.name,
            parent_id: category_update.parent_id,
            color: category_update.color,
            is_active: category_update.is_active,
            ..existing
        })
    }

    async fn delete(&self, category_id: &str) -> Result<usize> {
        Ok(self.categories.iter().filter(|c| c.id == category_id).count())
    }

    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id == category_id).cloned())
    }

    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Category>> {
        let categories = match is_active_filter {
            Some(active) => self
                .categories
                .iter()
                .filter(|c| c.is_active == active)
                .cloned()
                .collect(),
            None => self.categories.clone(),
        };
        Ok(categories)
    }

    fn has_children(&self, category_id: &str) -> Result<bool> {
        Ok(self
            .categories
            .iter()
            .any(|c| c.parent_id.as_deref() == Some(category_id)))
    }
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_category_with_valid_parent() {
    let service = create_service(vec![create_test_category("cat_food", "Food", None)]);

    let created = service
        .create_category(new_category("Groceries", Some("cat_food")))
        .await
        .unwrap();
    assert_eq!(created.parent_id.as_deref(), Some("cat_food"));
}

#[tokio::test]
async fn test_create_category_with_unknown_parent_is_rejected() {
    let service = create_service(vec![]);

    let result = service
        .create_category(new_category("Groceries", Some("cat_missing")))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_create_category_under_child_is_rejected() {
    let service = create_service(vec![
        create_test_category("cat_food", "Food", None),
        create_test_category("cat_groceries", "Groceries", Some("cat_food")),
    ]);

    let result = service
        .create_category(new_category("Produce", Some("cat_groceries")))
        .await;
    assert!(matches!(result, Err(Error::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_create_category_rejects_empty_name() {
    let service = create_service(vec![]);

    let result = service.create_category(new_category("  ", None)).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_category_cannot_be_its_own_parent() {
    let service = create_service(vec![create_test_category("cat_food", "Food", None)]);

    let result = service
        .update_category(CategoryUpdate {
            id: Some("cat_food".to_string()),
            name: "Food".to_string(),
            parent_id: Some("cat_food".to_string()),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            is_active: true,
        })
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_update_category_with_children_cannot_gain_parent() {
    let service = create_service(vec![
        create_test_category("cat_food", "Food", None),
        create_test_category("cat_groceries", "Groceries", Some("cat_food")),
        create_test_category("cat_home", "Home", None),
    ]);

    let result = service
        .update_category(CategoryUpdate {
            id: Some("cat_food".to_string()),
            name: "Food".to_string(),
            parent_id: Some("cat_home".to_string()),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            is_active: true,
        })
        .await;
    assert!(matches!(result, Err(Error::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_update_category_requires_id() {
    let service = create_service(vec![]);

    let result = service
        .update_category(CategoryUpdate {
            id: None,
            name: "Food".to_string(),
            parent_id: None,
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            is_active: true,
        })
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

// ============================================================================
// Read and Delete Tests
// ============================================================================

#[test]
fn test_get_category_maps_missing_row_to_not_found() {
    let service = create_service(vec![]);

    let result = service.get_category("cat_missing");
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_delete_missing_category_is_not_found() {
    let service = create_service(vec![]);

    let result = service.delete_category("cat_missing").await;
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[test]
fn test_list_categories_filters_by_active() {
    let mut inactive = create_test_category("cat_old", "Old", None);
    inactive.is_active = false;
    let service = create_service(vec![
        create_test_category("cat_food", "Food", None),
        inactive,
    ]);

    let active = service.list_categories(Some(true)).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "cat_food");
}

// ============================================================================
// Helper Functions
// ============================================================================

fn create_service(categories: Vec<Category>) -> CategoryService {
    CategoryService::new(Arc::new(MockCategoryRepository::new(categories)))
}

fn create_test_category(id: &str, name: &str, parent_id: Option<&str>) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        parent_id: parent_id.map(|p| p.to_string()),
        color: DEFAULT_CATEGORY_COLOR.to_string(),
        is_active: true,
        created_at: Utc::now().naive_utc(),
    }
}

fn new_category(name: &str, parent_id: Option<&str>) -> NewCategory {
    NewCategory {
        id: None,
        name: name.to_string(),
        parent_id: parent_id.map(|p| p.to_string()),
        color: DEFAULT_CATEGORY_COLOR.to_string(),
        is_active: true,
    }
}
