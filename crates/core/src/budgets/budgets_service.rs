use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::budgets::budgets_model::{Budget, BudgetSummary, BudgetUpdate, NewBudget, Period};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::transactions::TransactionRepositoryTrait;

/// Service for managing budgets and the planned-versus-actual report.
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
            category_repository,
        }
    }

    fn ensure_category_exists(&self, category_id: &str) -> Result<()> {
        match self.category_repository.get_by_id(category_id)? {
            Some(_) => Ok(()),
            None => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Category '{}' not found",
                category_id
            )))),
        }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        self.ensure_category_exists(&new_budget.category_id)?;
        debug!(
            "Creating budget for category {} in {}",
            new_budget.category_id, new_budget.period
        );
        self.repository.create(new_budget).await
    }

    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget> {
        budget_update.validate()?;
        self.ensure_category_exists(&budget_update.category_id)?;
        self.repository.update(budget_update).await
    }

    async fn delete_budget(&self, budget_id: &str) -> Result<()> {
        let affected = self.repository.delete(budget_id).await?;
        if affected == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Budget '{}' not found",
                budget_id
            ))));
        }
        Ok(())
    }

    fn get_budget(&self, budget_id: &str) -> Result<Budget> {
        self.repository.get_by_id(budget_id)
    }

    fn list_budgets(
        &self,
        period: Option<Period>,
        category_id: Option<&str>,
    ) -> Result<Vec<Budget>> {
        self.repository.list(period, category_id)
    }

    /// Joins budget rows with transaction actuals for one period.
    ///
    /// A category appears in the report when it has a budget row, at least
    /// one transaction in the period, or both. The missing side defaults to
    /// zero and `variance` is always `actual - planned`. Store failures
    /// from either fetch propagate unchanged.
    fn budget_summary(
        &self,
        period: Period,
        category_filter: &[String],
    ) -> Result<Vec<BudgetSummary>> {
        debug!("Building budget summary for {}", period);

        let budgets = self.repository.fetch_budget_data(period, category_filter)?;
        let transactions = self
            .transaction_repository
            .fetch_transactions(period.date_range(), category_filter)?;

        // One budget row per (category, period), so inserts never collide.
        let planned: HashMap<String, Decimal> = budgets
            .into_iter()
            .map(|budget| (budget.category_id, budget.planned))
            .collect();

        let mut actuals: HashMap<String, Decimal> = HashMap::new();
        for transaction in transactions {
            // Uncategorized transactions never contribute to the report.
            if let Some(category_id) = transaction.category_id {
                *actuals.entry(category_id).or_insert(Decimal::ZERO) += transaction.amount;
            }
        }

        let names: HashMap<String, String> = self
            .category_repository
            .list(None)?
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect();

        let mut category_ids: HashSet<&String> = planned.keys().collect();
        category_ids.extend(actuals.keys());

        let mut records = Vec::with_capacity(category_ids.len());
        for category_id in category_ids {
            // A category deleted between fetches is dropped from the report.
            let Some(name) = names.get(category_id) else {
                continue;
            };
            let planned_amount = planned.get(category_id).copied().unwrap_or(Decimal::ZERO);
            let actual = actuals.get(category_id).copied().unwrap_or(Decimal::ZERO);
            records.push(BudgetSummary {
                category_id: category_id.clone(),
                category: name.clone(),
                period,
                planned: planned_amount,
                actual,
                variance: actual - planned_amount,
            });
        }

        records.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });

        Ok(records)
    }
}
