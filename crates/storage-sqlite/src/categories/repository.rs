use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use ledgerbook_core::categories::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use ledgerbook_core::Result;

use super::model::CategoryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::categories;
use crate::schema::categories::dsl::*;
use crate::utils::prefixed_id;

/// Repository for managing category data in the database
pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut category_db: CategoryDB = new_category.into();
                category_db.id = prefixed_id("cat");

                let result_db = diesel::insert_into(categories::table)
                    .values(&category_db)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(result_db))
            })
            .await
    }

    async fn update(&self, category_update: CategoryUpdate) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut category_db: CategoryDB = category_update.into();

                let existing = categories
                    .select(CategoryDB::as_select())
                    .find(&category_db.id)
                    .first::<CategoryDB>(conn)
                    .map_err(StorageError::from)?;

                category_db.created_at = existing.created_at;

                diesel::update(categories.find(&category_db.id))
                    .set(&category_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(category_db.into())
            })
            .await
    }

    /// Deletes a category. Foreign key actions detach child categories,
    /// clear the category from transactions, and remove its budgets.
    async fn delete(&self, category_id: &str) -> Result<usize> {
        let id_to_delete = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories.find(id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let category = categories
            .select(CategoryDB::as_select())
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(category.map(Category::from))
    }

    /// Lists categories ordered by name, optionally filtering by active status
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = categories::table.into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(is_active.eq(active));
        }

        let results = query
            .select(CategoryDB::as_select())
            .order(name.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Category::from).collect())
    }

    fn has_children(&self, category_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;

        let children: i64 = categories
            .filter(parent_id.eq(category_id))
            .count()
            .get_result(&mut conn)
            .into_core()?;

        Ok(children > 0)
    }
}
