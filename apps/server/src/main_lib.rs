use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use ledgerbook_core::{
    accounts::{AccountService, AccountServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use ledgerbook_storage_sqlite::{
    accounts::AccountRepository,
    budgets::BudgetRepository,
    categories::CategoryRepository,
    db::{self, write_actor},
    transactions::TransactionRepository,
};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait + Send + Sync>,
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub pool: Arc<db::DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    // Ensure DATABASE_URL aligns with LB_DB_PATH so storage picks the right file
    std::env::set_var("DATABASE_URL", &config.db_path);
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));

    let account_service = Arc::new(AccountService::new(
        account_repo.clone(),
        transaction_repo.clone(),
    ));
    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repo.clone(),
        account_repo.clone(),
        category_repo.clone(),
    ));
    let budget_service = Arc::new(BudgetService::new(
        budget_repo,
        transaction_repo.clone(),
        category_repo.clone(),
    ));

    Ok(Arc::new(AppState {
        account_service,
        category_service,
        transaction_service,
        budget_service,
        pool,
    }))
}
