//! Budgets module - domain models, services, and traits.

mod budgets_model;
mod budgets_service;
mod budgets_traits;

#[cfg(test)]
mod budgets_model_tests;
#[cfg(test)]
mod budgets_service_tests;

// Re-export the public interface
pub use budgets_model::{Budget, BudgetSummary, BudgetUpdate, NewBudget, Period};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
