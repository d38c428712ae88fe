//! Seeds the configured database with sample data for local development.
//!
//! Usage: `seed [--fresh]`. With `--fresh` the database file is removed
//! first so the run starts from empty tables.

use chrono::{Datelike, Local, NaiveDate};
use ledgerbook_core::{
    accounts::{AccountType, NewAccount},
    budgets::{NewBudget, Period},
    categories::NewCategory,
    transactions::NewTransaction,
};
use ledgerbook_server::{build_state, config::Config, init_tracing};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();

    if std::env::args().any(|arg| arg == "--fresh") {
        remove_database(&config.db_path);
    }

    let state = build_state(&config).await?;

    let checking = state
        .account_service
        .create_account(NewAccount {
            id: None,
            name: "Everyday Checking".to_string(),
            account_type: AccountType::Checking,
            currency: "USD".to_string(),
            opening_balance: dec("2500"),
            description: Some("Primary spending account".to_string()),
            is_active: true,
        })
        .await?;
    let savings = state
        .account_service
        .create_account(NewAccount {
            id: None,
            name: "Rainy Day Savings".to_string(),
            account_type: AccountType::Savings,
            currency: "USD".to_string(),
            opening_balance: dec("10000"),
            description: None,
            is_active: true,
        })
        .await?;

    let food = create_category(&state, "Food", None).await?;
    let groceries = create_category(&state, "Groceries", Some(&food)).await?;
    let dining = create_category(&state, "Dining Out", Some(&food)).await?;
    let transport = create_category(&state, "Transport", None).await?;
    let utilities = create_category(&state, "Utilities", None).await?;
    let salary = create_category(&state, "Salary", None).await?;
    let entertainment = create_category(&state, "Entertainment", None).await?;

    let current = Period::containing(Local::now().date_naive());
    let mut transaction_count = 0;
    for months_ago in 0..3 {
        let period = current.months_back(months_ago);
        let rows = [
            (&checking.account.id, Some(&salary), "4200", 1, "Paycheck"),
            (&checking.account.id, Some(&groceries), "-96.40", 3, "Supermarket"),
            (&checking.account.id, Some(&groceries), "-54.15", 17, "Supermarket"),
            (&checking.account.id, Some(&dining), "-38.90", 9, "Dinner out"),
            (&checking.account.id, Some(&transport), "-62.00", 5, "Monthly transit pass"),
            (&checking.account.id, Some(&utilities), "-118.75", 12, "Electricity"),
            (&checking.account.id, Some(&entertainment), "-24.99", 20, "Streaming service"),
            (&savings.account.id, None, "500", 2, "Monthly savings top-up"),
        ];
        for (account_id, category, amount, day_of_month, description) in rows {
            state
                .transaction_service
                .create_transaction(NewTransaction {
                    id: None,
                    account_id: account_id.clone(),
                    category_id: category.cloned(),
                    amount: dec(amount),
                    date: day(period, day_of_month),
                    description: Some(description.to_string()),
                    reference: None,
                })
                .await?;
            transaction_count += 1;
        }

        for (category_id, planned) in [
            (&groceries, "450"),
            (&dining, "200"),
            (&transport, "150"),
            (&utilities, "220"),
            (&entertainment, "120"),
        ] {
            state
                .budget_service
                .create_budget(NewBudget {
                    id: None,
                    category_id: (*category_id).clone(),
                    period,
                    planned: dec(planned),
                    notes: None,
                })
                .await?;
        }
    }

    tracing::info!(
        "Seeded 2 accounts, 7 categories, {} transactions, and 15 budgets into {}",
        transaction_count,
        config.db_path
    );
    Ok(())
}

async fn create_category(
    state: &ledgerbook_server::AppState,
    name: &str,
    parent_id: Option<&String>,
) -> anyhow::Result<String> {
    let category = state
        .category_service
        .create_category(NewCategory {
            id: None,
            name: name.to_string(),
            parent_id: parent_id.cloned(),
            color: "#0066cc".to_string(),
            is_active: true,
        })
        .await?;
    Ok(category.id)
}

/// Removes the database file along with its WAL sidecar files.
fn remove_database(db_path: &str) {
    for path in [
        db_path.to_string(),
        format!("{}-wal", db_path),
        format!("{}-shm", db_path),
    ] {
        if std::fs::remove_file(&path).is_ok() {
            tracing::info!("Removed {}", path);
        }
    }
}

fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

fn day(period: Period, day_of_month: u32) -> NaiveDate {
    let (start, _) = period.date_range();
    start.with_day(day_of_month).unwrap_or(start)
}
