//! Transaction service implementation.

use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::transactions_model::{
    CategorySpending, MonthlyTotal, NewTransaction, Transaction, TransactionQuery,
    TransactionSummary, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::budgets::Period;
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Service for recording transactions and computing signed totals.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        TransactionService {
            repository,
            account_repository,
            category_repository,
        }
    }

    /// Maps a missing account to a validation error so bad references fail
    /// the request instead of surfacing as a lookup failure. Any other
    /// repository error propagates unchanged.
    fn ensure_account_exists(&self, account_id: &str) -> Result<()> {
        match self.account_repository.get_by_id(account_id) {
            Ok(_) => Ok(()),
            Err(Error::Database(DatabaseError::NotFound(_))) => Err(Error::Validation(
                ValidationError::InvalidInput(format!("Account '{}' not found", account_id)),
            )),
            Err(e) => Err(e),
        }
    }

    fn ensure_category_exists(&self, category_id: &str) -> Result<()> {
        self.category_repository
            .get_by_id(category_id)?
            .map(|_| ())
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Category '{}' not found",
                    category_id
                )))
            })
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        self.ensure_account_exists(&new_transaction.account_id)?;
        if let Some(category_id) = &new_transaction.category_id {
            self.ensure_category_exists(category_id)?;
        }
        debug!(
            "Creating transaction on account {} for {}",
            new_transaction.account_id, new_transaction.amount
        );
        self.repository.create(new_transaction).await
    }

    async fn update_transaction(
        &self,
        transaction_update: TransactionUpdate,
    ) -> Result<Transaction> {
        transaction_update.validate()?;
        self.ensure_account_exists(&transaction_update.account_id)?;
        if let Some(category_id) = &transaction_update.category_id {
            self.ensure_category_exists(category_id)?;
        }
        self.repository.update(transaction_update).await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        debug!("Deleting transaction: {}", transaction_id);
        let deleted = self.repository.delete(transaction_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Transaction '{}' not found",
                transaction_id
            ))));
        }
        Ok(())
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(transaction_id)
    }

    fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        self.repository.list(query)
    }

    fn get_summary(&self, query: &TransactionQuery) -> Result<TransactionSummary> {
        let transactions = self.repository.list(query)?;
        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        for transaction in &transactions {
            if transaction.amount > Decimal::ZERO {
                total_income += transaction.amount;
            } else {
                total_expenses += transaction.amount;
            }
        }
        Ok(TransactionSummary {
            total_income,
            total_expenses,
            net_balance: total_income + total_expenses,
            transaction_count: transactions.len(),
        })
    }

    fn spending_by_category(&self, query: &TransactionQuery) -> Result<Vec<CategorySpending>> {
        let transactions = self.repository.list(query)?;
        let names: HashMap<String, String> = self
            .category_repository
            .list(None)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut grouped: HashMap<Option<String>, (Decimal, usize)> = HashMap::new();
        for transaction in &transactions {
            let entry = grouped
                .entry(transaction.category_id.clone())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += transaction.amount;
            entry.1 += 1;
        }

        let mut rows: Vec<CategorySpending> = grouped
            .into_iter()
            .map(|(category_id, (total_amount, transaction_count))| {
                let category = category_id
                    .as_ref()
                    .and_then(|id| names.get(id).cloned())
                    .unwrap_or_else(|| "Uncategorized".to_string());
                CategorySpending {
                    category_id,
                    category,
                    total_amount,
                    transaction_count,
                }
            })
            .collect();
        // Most negative totals first, so the biggest spenders lead.
        rows.sort_by(|a, b| {
            a.total_amount
                .cmp(&b.total_amount)
                .then_with(|| a.category.cmp(&b.category))
        });
        Ok(rows)
    }

    fn monthly_totals(&self, months: u32) -> Result<Vec<MonthlyTotal>> {
        let months = months.max(1);
        let current = Period::containing(Utc::now().date_naive());
        let start = current.months_back(months - 1);
        let range = (start.date_range().0, current.date_range().1);
        let transactions = self.repository.fetch_transactions(range, &[])?;

        let mut by_month: BTreeMap<Period, MonthlyTotal> = BTreeMap::new();
        for transaction in &transactions {
            let period = Period::containing(transaction.date);
            let entry = by_month.entry(period).or_insert_with(|| MonthlyTotal {
                period,
                income: Decimal::ZERO,
                expenses: Decimal::ZERO,
                net: Decimal::ZERO,
                transaction_count: 0,
            });
            if transaction.amount > Decimal::ZERO {
                entry.income += transaction.amount;
            } else {
                entry.expenses += transaction.amount;
            }
            entry.net += transaction.amount;
            entry.transaction_count += 1;
        }
        Ok(by_month.into_values().collect())
    }
}
