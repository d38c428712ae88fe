//! Database model for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ledgerbook_core::budgets::{Budget, BudgetUpdate, NewBudget, Period};
use ledgerbook_core::Error;

/// Database model for budgets.
///
/// The period is split into `year` and `month` columns so the unique index
/// on (category_id, year, month) can enforce one budget per category and
/// period.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct BudgetDB {
    pub id: String,
    pub category_id: String,
    pub year: i32,
    pub month: i32,
    // Money is stored as TEXT to keep decimal values exact.
    pub planned: String,
    pub notes: Option<String>,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
    #[diesel(skip_insertion)]
    pub updated_at: NaiveDateTime,
}

// Rebuilding the period validates the stored year and month.
impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self, Error> {
        Ok(Self {
            id: db.id,
            category_id: db.category_id,
            period: Period::new(db.year, db.month as u32)?,
            planned: Decimal::from_str(&db.planned).unwrap_or_default(),
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewBudget> for BudgetDB {
    fn from(domain: NewBudget) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            category_id: domain.category_id,
            year: domain.period.year(),
            month: domain.period.month() as i32,
            planned: domain.planned.to_string(),
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<BudgetUpdate> for BudgetDB {
    fn from(domain: BudgetUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            category_id: domain.category_id,
            year: domain.period.year(),
            month: domain.period.month() as i32,
            planned: domain.planned.to_string(),
            notes: domain.notes,
            created_at: NaiveDateTime::default(), // This will be filled from existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
