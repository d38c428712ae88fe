use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use ledgerbook_core::transactions::{
    NewTransaction, Transaction, TransactionQuery, TransactionRepositoryTrait, TransactionUpdate,
};
use ledgerbook_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;
use crate::utils::prefixed_id;

/// Repository for managing transaction data in the database
pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let mut transaction_db: TransactionDB = new_transaction.into();
                transaction_db.id = prefixed_id("txn");

                let result_db = diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(result_db))
            })
            .await
    }

    async fn update(&self, transaction_update: TransactionUpdate) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let mut transaction_db: TransactionDB = transaction_update.into();

                let existing = transactions
                    .select(TransactionDB::as_select())
                    .find(&transaction_db.id)
                    .first::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;

                transaction_db.created_at = existing.created_at;
                transaction_db.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(transactions.find(&transaction_db.id))
                    .set(&transaction_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(transaction_db.into())
            })
            .await
    }

    async fn delete(&self, transaction_id: &str) -> Result<usize> {
        let id_to_delete = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions.find(id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let transaction = transactions
            .select(TransactionDB::as_select())
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .into_core()?;

        Ok(transaction.into())
    }

    /// Lists transactions matching the query filters, newest first
    fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut stmt = transactions::table.into_boxed();

        if let Some(ref account) = query.account_id {
            stmt = stmt.filter(account_id.eq(account.clone()));
        }
        if let Some(ref category) = query.category_id {
            stmt = stmt.filter(category_id.eq(category.clone()));
        }
        if let Some(start) = query.start_date {
            stmt = stmt.filter(date.ge(start));
        }
        if let Some(end) = query.end_date {
            // The range is half-open: the end date is exclusive.
            stmt = stmt.filter(date.lt(end));
        }

        let results = stmt
            .select(TransactionDB::as_select())
            .order((date.desc(), id.desc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Transaction::from).collect())
    }

    fn fetch_transactions(
        &self,
        date_range: (NaiveDate, NaiveDate),
        category_filter: &[String],
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut stmt = transactions::table
            .filter(date.ge(date_range.0))
            .filter(date.lt(date_range.1))
            .into_boxed();

        if !category_filter.is_empty() {
            // SQL IN never matches NULL, so uncategorized rows drop out
            // whenever a filter is present.
            stmt = stmt.filter(category_id.assume_not_null().eq_any(category_filter.to_vec()));
        }

        let results = stmt
            .select(TransactionDB::as_select())
            .order((date.asc(), id.asc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Transaction::from).collect())
    }

    /// Sums the signed amounts of all transactions for one account.
    fn sum_for_account(&self, account: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;

        // Amounts are TEXT in SQLite; sum over parsed decimals, not SQL SUM.
        let amounts: Vec<String> = transactions
            .filter(account_id.eq(account))
            .select(amount)
            .load::<String>(&mut conn)
            .into_core()?;

        Ok(amounts
            .iter()
            .map(|value| Decimal::from_str(value).unwrap_or_default())
            .sum())
    }

    /// Sums the signed amounts of all transactions, grouped by account.
    fn sum_by_account(&self) -> Result<HashMap<String, Decimal>> {
        let mut conn = get_connection(&self.pool)?;

        let rows: Vec<(String, String)> = transactions
            .select((account_id, amount))
            .load::<(String, String)>(&mut conn)
            .into_core()?;

        let mut totals = HashMap::new();
        for (account, value) in rows {
            *totals.entry(account).or_insert(Decimal::ZERO) +=
                Decimal::from_str(&value).unwrap_or_default();
        }
        Ok(totals)
    }
}
