//! Database model for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use ledgerbook_core::transactions::{NewTransaction, Transaction, TransactionUpdate};

/// Database model for transactions
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub account_id: String,
    pub category_id: Option<String>,
    // Money is stored as TEXT to keep decimal values exact.
    pub amount: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub reference: Option<String>,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
    #[diesel(skip_insertion)]
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            category_id: db.category_id,
            amount: Decimal::from_str(&db.amount).unwrap_or_default(),
            date: db.date,
            description: db.description,
            reference: db.reference,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            account_id: domain.account_id,
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            date: domain.date,
            description: domain.description,
            reference: domain.reference,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<TransactionUpdate> for TransactionDB {
    fn from(domain: TransactionUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            account_id: domain.account_id,
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            date: domain.date,
            description: domain.description,
            reference: domain.reference,
            created_at: NaiveDateTime::default(), // This will be filled from existing record
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
