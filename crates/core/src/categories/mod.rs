//! Categories module - domain models, services, and traits.

mod categories_model;
mod categories_service;
mod categories_traits;

#[cfg(test)]
mod categories_service_tests;

// Re-export the public interface
pub use categories_model::{Category, CategoryUpdate, NewCategory, DEFAULT_CATEGORY_COLOR};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
