//! Transaction repository and service traits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::transactions_model::{
    CategorySpending, MonthlyTotal, NewTransaction, Transaction, TransactionQuery,
    TransactionSummary, TransactionUpdate,
};
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Creates a new transaction.
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Updates an existing transaction.
    async fn update(&self, transaction_update: TransactionUpdate) -> Result<Transaction>;

    /// Deletes a transaction by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, transaction_id: &str) -> Result<usize>;

    /// Retrieves a transaction by its ID.
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Lists transactions matching the query, newest first.
    fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;

    /// Fetches transactions within a half-open date range, optionally
    /// restricted to a set of category IDs.
    ///
    /// An empty `category_filter` means all categories. Filter IDs that
    /// match no rows simply contribute nothing; they are not an error.
    fn fetch_transactions(
        &self,
        date_range: (NaiveDate, NaiveDate),
        category_filter: &[String],
    ) -> Result<Vec<Transaction>>;

    /// Sums the signed amounts of all transactions for one account.
    fn sum_for_account(&self, account_id: &str) -> Result<Decimal>;

    /// Sums the signed amounts of all transactions, grouped by account.
    fn sum_by_account(&self) -> Result<HashMap<String, Decimal>>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Creates a new transaction after checking its references.
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Updates an existing transaction after checking its references.
    async fn update_transaction(
        &self,
        transaction_update: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Deletes a transaction.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;

    /// Retrieves a transaction by ID.
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    /// Lists transactions matching the query, newest first.
    fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>>;

    /// Computes signed income/expense totals over the matching transactions.
    fn get_summary(&self, query: &TransactionQuery) -> Result<TransactionSummary>;

    /// Groups matching transactions by category, biggest spenders first.
    fn spending_by_category(&self, query: &TransactionQuery) -> Result<Vec<CategorySpending>>;

    /// Computes month-by-month totals over the trailing `months` calendar
    /// months, oldest first. Months without transactions are omitted.
    fn monthly_totals(&self, months: u32) -> Result<Vec<MonthlyTotal>>;
}
