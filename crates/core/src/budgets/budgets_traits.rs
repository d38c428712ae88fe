use async_trait::async_trait;

use crate::budgets::budgets_model::{Budget, BudgetSummary, BudgetUpdate, NewBudget, Period};
use crate::Result;

/// Trait defining the contract for budget repository operations.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    async fn create(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update(&self, budget_update: BudgetUpdate) -> Result<Budget>;
    async fn delete(&self, budget_id: &str) -> Result<usize>;
    fn get_by_id(&self, budget_id: &str) -> Result<Budget>;

    /// Lists budgets, optionally narrowed to one period and/or category,
    /// ordered by period then category.
    fn list(&self, period: Option<Period>, category_id: Option<&str>) -> Result<Vec<Budget>>;

    /// Fetches the budget rows for a period. An empty `category_filter`
    /// means all categories; filter entries matching nothing contribute
    /// nothing and are not an error.
    fn fetch_budget_data(&self, period: Period, category_filter: &[String])
        -> Result<Vec<Budget>>;
}

/// Trait defining the contract for budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, budget_id: &str) -> Result<()>;
    fn get_budget(&self, budget_id: &str) -> Result<Budget>;
    fn list_budgets(&self, period: Option<Period>, category_id: Option<&str>)
        -> Result<Vec<Budget>>;

    /// Builds the planned-versus-actual report for one period, one row per
    /// category with a budget or at least one transaction in the period.
    fn budget_summary(&self, period: Period, category_filter: &[String])
        -> Result<Vec<BudgetSummary>>;
}
