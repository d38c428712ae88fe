use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use ledgerbook_core::budgets::{
    Budget, BudgetRepositoryTrait, BudgetUpdate, NewBudget, Period,
};
use ledgerbook_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::budgets;
use crate::schema::budgets::dsl::*;
use crate::utils::prefixed_id;

/// Repository for managing budget data in the database
pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let mut budget_db: BudgetDB = new_budget.into();
                budget_db.id = prefixed_id("bgt");

                // A second budget for the same category and period violates
                // the unique index and surfaces as a constraint error.
                let result_db = diesel::insert_into(budgets::table)
                    .values(&budget_db)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Budget::try_from(result_db)
            })
            .await
    }

    async fn update(&self, budget_update: BudgetUpdate) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let mut budget_db: BudgetDB = budget_update.into();

                let existing = budgets
                    .select(BudgetDB::as_select())
                    .find(&budget_db.id)
                    .first::<BudgetDB>(conn)
                    .map_err(StorageError::from)?;

                budget_db.created_at = existing.created_at;
                budget_db.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(budgets.find(&budget_db.id))
                    .set(&budget_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                budget_db.try_into()
            })
            .await
    }

    async fn delete(&self, budget_id: &str) -> Result<usize> {
        let id_to_delete = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(budgets.find(id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;

        let budget = budgets
            .select(BudgetDB::as_select())
            .find(budget_id)
            .first::<BudgetDB>(&mut conn)
            .into_core()?;

        budget.try_into()
    }

    fn list(&self, period: Option<Period>, category: Option<&str>) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let mut stmt = budgets::table.into_boxed();

        if let Some(p) = period {
            stmt = stmt
                .filter(year.eq(p.year()))
                .filter(month.eq(p.month() as i32));
        }
        if let Some(cat) = category {
            stmt = stmt.filter(category_id.eq(cat.to_string()));
        }

        let results = stmt
            .select(BudgetDB::as_select())
            .order((year.asc(), month.asc(), category_id.asc()))
            .load::<BudgetDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(Budget::try_from).collect()
    }

    fn fetch_budget_data(
        &self,
        period: Period,
        category_filter: &[String],
    ) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let mut stmt = budgets::table
            .filter(year.eq(period.year()))
            .filter(month.eq(period.month() as i32))
            .into_boxed();

        if !category_filter.is_empty() {
            stmt = stmt.filter(category_id.eq_any(category_filter.to_vec()));
        }

        let results = stmt
            .select(BudgetDB::as_select())
            .order(category_id.asc())
            .load::<BudgetDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(Budget::try_from).collect()
    }
}
