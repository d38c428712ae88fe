//! Database model for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ledgerbook_core::categories::{Category, CategoryUpdate, NewCategory};

/// Database model for categories
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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub color: String,
    pub is_active: bool,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            parent_id: db.parent_id,
            color: db.color,
            is_active: db.is_active,
            created_at: db.created_at,
        }
    }
}

impl From<NewCategory> for CategoryDB {
    fn from(domain: NewCategory) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            parent_id: domain.parent_id,
            color: domain.color,
            is_active: domain.is_active,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<CategoryUpdate> for CategoryDB {
    fn from(domain: CategoryUpdate) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            parent_id: domain.parent_id,
            color: domain.color,
            is_active: domain.is_active,
            created_at: NaiveDateTime::default(), // This will be filled from existing record
        }
    }
}
