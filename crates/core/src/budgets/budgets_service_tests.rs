//! Tests for the budget service, covering CRUD guards and the
//! planned-versus-actual summary report.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::budgets::{
    Budget, BudgetRepositoryTrait, BudgetService, BudgetServiceTrait, BudgetUpdate, NewBudget,
    Period,
};
use crate::categories::{
    Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory, DEFAULT_CATEGORY_COLOR,
};
use crate::errors::{DatabaseError, Error};
use crate::transactions::{
    NewTransaction, Transaction, TransactionQuery, TransactionRepositoryTrait, TransactionUpdate,
};
use crate::Result;

// =============================================================================
// Mock Implementations
// =============================================================================

struct MockBudgetRepository {
    budgets: Vec<Budget>,
    fail_with_connection_error: bool,
}

#[async_trait]
impl BudgetRepositoryTrait for MockBudgetRepository {
    async fn create(&self, new_budget: NewBudget) -> Result<Budget> {
        Ok(Budget {
            id: new_budget
                .id
                .unwrap_or_else(|| "bgt_000000000001".to_string()),
            category_id: new_budget.category_id,
            period: new_budget.period,
            planned: new_budget.planned,
            notes: new_budget.notes,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        })
    }

    async fn update(&self, _budget_update: BudgetUpdate) -> Result<Budget> {
        unimplemented!("not needed for these tests")
    }

    async fn delete(&self, budget_id: &str) -> Result<usize> {
        Ok(self
            .budgets
            .iter()
            .filter(|budget| budget.id == budget_id)
            .count())
    }

    fn get_by_id(&self, budget_id: &str) -> Result<Budget> {
        self.budgets
            .iter()
            .find(|budget| budget.id == budget_id)
            .cloned()
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Budget '{}' not found",
                    budget_id
                )))
            })
    }

    fn list(&self, period: Option<Period>, category_id: Option<&str>) -> Result<Vec<Budget>> {
        Ok(self
            .budgets
            .iter()
            .filter(|budget| period.map_or(true, |p| budget.period == p))
            .filter(|budget| category_id.map_or(true, |id| budget.category_id == id))
            .cloned()
            .collect())
    }

    fn fetch_budget_data(
        &self,
        period: Period,
        category_filter: &[String],
    ) -> Result<Vec<Budget>> {
        if self.fail_with_connection_error {
            return Err(Error::Database(DatabaseError::ConnectionFailed(
                "connection pool exhausted".to_string(),
            )));
        }
        Ok(self
            .budgets
            .iter()
            .filter(|budget| budget.period == period)
            .filter(|budget| {
                category_filter.is_empty() || category_filter.contains(&budget.category_id)
            })
            .cloned()
            .collect())
    }
}

struct MockTransactionRepository {
    transactions: Vec<Transaction>,
    fail_with_connection_error: bool,
}

#[async_trait]
impl TransactionRepositoryTrait for MockTransactionRepository {
    async fn create(&self, _new_transaction: NewTransaction) -> Result<Transaction> {
        unimplemented!("not needed for these tests")
    }

    async fn update(&self, _transaction_update: TransactionUpdate) -> Result<Transaction> {
        unimplemented!("not needed for these tests")
    }

    async fn delete(&self, _transaction_id: &str) -> Result<usize> {
        unimplemented!("not needed for these tests")
    }

    fn get_by_id(&self, _transaction_id: &str) -> Result<Transaction> {
        unimplemented!("not needed for these tests")
    }

    fn list(&self, _query: &TransactionQuery) -> Result<Vec<Transaction>> {
        unimplemented!("not needed for these tests")
    }

    fn fetch_transactions(
        &self,
        date_range: (NaiveDate, NaiveDate),
        category_filter: &[String],
    ) -> Result<Vec<Transaction>> {
        if self.fail_with_connection_error {
            return Err(Error::Database(DatabaseError::ConnectionFailed(
                "connection pool exhausted".to_string(),
            )));
        }
        Ok(self
            .transactions
            .iter()
            .filter(|transaction| {
                transaction.date >= date_range.0 && transaction.date < date_range.1
            })
            .filter(|transaction| {
                category_filter.is_empty()
                    || transaction
                        .category_id
                        .as_ref()
                        .map_or(false, |id| category_filter.contains(id))
            })
            .cloned()
            .collect())
    }

    fn sum_for_account(&self, _account_id: &str) -> Result<Decimal> {
        unimplemented!("not needed for these tests")
    }

    fn sum_by_account(&self) -> Result<HashMap<String, Decimal>> {
        unimplemented!("not needed for these tests")
    }
}

struct MockCategoryRepository {
    categories: Vec<Category>,
}

#[async_trait]
impl CategoryRepositoryTrait for MockCategoryRepository {
    async fn create(&self, _new_category: NewCategory) -> Result<Category> {
        unimplemented!("not needed for these tests")
    }

    async fn update(&self, _category_update: CategoryUpdate) -> Result<Category> {
        unimplemented!("not needed for these tests")
    }

    async fn delete(&self, _category_id: &str) -> Result<usize> {
        unimplemented!("not needed for these tests")
    }

    fn get_by_id(&self, category_id: &str) -> Result<Option<Category>> {
        Ok(self
            .categories
            .iter()
            .find(|category| category.id == category_id)
            .cloned())
    }

    fn list(&self, _is_active: Option<bool>) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn has_children(&self, _category_id: &str) -> Result<bool> {
        Ok(false)
    }
}

// =============================================================================
// Budget Summary Tests
// =============================================================================

#[test]
fn test_budget_summary_with_budget_and_transactions() {
    let march = period(2024, 3);
    let service = create_service(
        vec![create_test_budget(
            "bgt_1",
            "cat_groceries",
            march,
            dec!(300),
        )],
        vec![
            create_test_transaction(Some("cat_groceries"), dec!(-45.50), date(2024, 3, 4)),
            create_test_transaction(Some("cat_groceries"), dec!(-120.00), date(2024, 3, 18)),
        ],
        vec![create_test_category("cat_groceries", "Groceries")],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.category_id, "cat_groceries");
    assert_eq!(record.category, "Groceries");
    assert_eq!(record.period, march);
    assert_eq!(record.planned, dec!(300));
    assert_eq!(record.actual, dec!(-165.50));
    assert_eq!(record.variance, dec!(-465.50));
}

#[test]
fn test_budget_summary_repeated_calls_match() {
    let march = period(2024, 3);
    let service = create_service(
        vec![create_test_budget(
            "bgt_1",
            "cat_groceries",
            march,
            dec!(300),
        )],
        vec![
            create_test_transaction(Some("cat_groceries"), dec!(-45.50), date(2024, 3, 4)),
            create_test_transaction(Some("cat_dining"), dec!(-18.25), date(2024, 3, 12)),
        ],
        vec![
            create_test_category("cat_groceries", "Groceries"),
            create_test_category("cat_dining", "Dining"),
        ],
    );

    let first = service.budget_summary(march, &[]).unwrap();
    let second = service.budget_summary(march, &[]).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_budget_summary_budget_without_transactions() {
    let march = period(2024, 3);
    let service = create_service(
        vec![create_test_budget("bgt_1", "cat_rent", march, dec!(900))],
        vec![],
        vec![create_test_category("cat_rent", "Rent")],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].planned, dec!(900));
    assert_eq!(records[0].actual, Decimal::ZERO);
    assert_eq!(records[0].variance, dec!(-900));
}

#[test]
fn test_budget_summary_transactions_without_budget() {
    let march = period(2024, 3);
    let service = create_service(
        vec![],
        vec![create_test_transaction(
            Some("cat_dining"),
            dec!(-62.10),
            date(2024, 3, 9),
        )],
        vec![create_test_category("cat_dining", "Dining")],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].planned, Decimal::ZERO);
    assert_eq!(records[0].actual, dec!(-62.10));
    assert_eq!(records[0].variance, dec!(-62.10));
}

#[test]
fn test_budget_summary_empty_period_returns_empty() {
    let service = create_service(
        vec![create_test_budget(
            "bgt_1",
            "cat_rent",
            period(2024, 3),
            dec!(900),
        )],
        vec![create_test_transaction(
            Some("cat_rent"),
            dec!(-900),
            date(2024, 3, 1),
        )],
        vec![create_test_category("cat_rent", "Rent")],
    );

    let records = service.budget_summary(period(2024, 7), &[]).unwrap();

    assert!(records.is_empty());
}

#[test]
fn test_budget_summary_keeps_signed_amounts() {
    let march = period(2024, 3);
    let service = create_service(
        vec![create_test_budget(
            "bgt_1",
            "cat_groceries",
            march,
            dec!(300),
        )],
        vec![
            create_test_transaction(Some("cat_groceries"), dec!(-45.50), date(2024, 3, 4)),
            create_test_transaction(Some("cat_groceries"), dec!(-120.00), date(2024, 3, 18)),
            // A refund stays positive and is not flipped.
            create_test_transaction(Some("cat_groceries"), dec!(25.00), date(2024, 3, 20)),
        ],
        vec![create_test_category("cat_groceries", "Groceries")],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    assert_eq!(records[0].actual, dec!(-140.50));
    assert_eq!(records[0].variance, dec!(-440.50));
}

#[test]
fn test_budget_summary_respects_period_bounds() {
    let march = period(2024, 3);
    let service = create_service(
        vec![],
        vec![
            create_test_transaction(Some("cat_rent"), dec!(-10), date(2024, 2, 29)),
            create_test_transaction(Some("cat_rent"), dec!(-20), date(2024, 3, 1)),
            create_test_transaction(Some("cat_rent"), dec!(-30), date(2024, 3, 31)),
            create_test_transaction(Some("cat_rent"), dec!(-40), date(2024, 4, 1)),
        ],
        vec![create_test_category("cat_rent", "Rent")],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].actual, dec!(-50));
}

#[test]
fn test_budget_summary_skips_uncategorized_transactions() {
    let march = period(2024, 3);
    let service = create_service(
        vec![],
        vec![
            create_test_transaction(None, dec!(-75), date(2024, 3, 5)),
            create_test_transaction(Some("cat_dining"), dec!(-20), date(2024, 3, 6)),
        ],
        vec![create_test_category("cat_dining", "Dining")],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category_id, "cat_dining");
    assert_eq!(records[0].actual, dec!(-20));
}

#[test]
fn test_budget_summary_category_filter() {
    let march = period(2024, 3);
    let service = create_service(
        vec![
            create_test_budget("bgt_1", "cat_groceries", march, dec!(300)),
            create_test_budget("bgt_2", "cat_rent", march, dec!(900)),
        ],
        vec![
            create_test_transaction(Some("cat_groceries"), dec!(-45.50), date(2024, 3, 4)),
            create_test_transaction(Some("cat_rent"), dec!(-900), date(2024, 3, 1)),
        ],
        vec![
            create_test_category("cat_groceries", "Groceries"),
            create_test_category("cat_rent", "Rent"),
        ],
    );

    // Filter entries that match nothing are skipped, not an error.
    let filter = vec!["cat_groceries".to_string(), "cat_missing".to_string()];
    let records = service.budget_summary(march, &filter).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category_id, "cat_groceries");
}

#[test]
fn test_budget_summary_orders_by_name_then_id() {
    let march = period(2024, 3);
    let service = create_service(
        vec![
            create_test_budget("bgt_1", "cat_utilities", march, dec!(150)),
            create_test_budget("bgt_2", "cat_dining_b", march, dec!(100)),
            create_test_budget("bgt_3", "cat_dining_a", march, dec!(80)),
        ],
        vec![],
        vec![
            create_test_category("cat_utilities", "Utilities"),
            create_test_category("cat_dining_b", "Dining"),
            create_test_category("cat_dining_a", "Dining"),
        ],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    let order: Vec<(&str, &str)> = records
        .iter()
        .map(|record| (record.category.as_str(), record.category_id.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Dining", "cat_dining_a"),
            ("Dining", "cat_dining_b"),
            ("Utilities", "cat_utilities"),
        ]
    );
}

#[test]
fn test_budget_summary_excludes_unknown_categories() {
    let march = period(2024, 3);
    // The budget references a category that no longer exists.
    let service = create_service(
        vec![create_test_budget("bgt_1", "cat_ghost", march, dec!(50))],
        vec![],
        vec![],
    );

    let records = service.budget_summary(march, &[]).unwrap();

    assert!(records.is_empty());
}

#[test]
fn test_budget_summary_propagates_budget_store_failure() {
    let service = BudgetService::new(
        Arc::new(MockBudgetRepository {
            budgets: vec![],
            fail_with_connection_error: true,
        }),
        Arc::new(MockTransactionRepository {
            transactions: vec![],
            fail_with_connection_error: false,
        }),
        Arc::new(MockCategoryRepository { categories: vec![] }),
    );

    match service.budget_summary(period(2024, 3), &[]) {
        Err(Error::Database(DatabaseError::ConnectionFailed(message))) => {
            assert_eq!(message, "connection pool exhausted");
        }
        other => panic!("expected connection failure, got {:?}", other),
    }
}

#[test]
fn test_budget_summary_propagates_transaction_store_failure() {
    let service = BudgetService::new(
        Arc::new(MockBudgetRepository {
            budgets: vec![],
            fail_with_connection_error: false,
        }),
        Arc::new(MockTransactionRepository {
            transactions: vec![],
            fail_with_connection_error: true,
        }),
        Arc::new(MockCategoryRepository { categories: vec![] }),
    );

    assert!(matches!(
        service.budget_summary(period(2024, 3), &[]),
        Err(Error::Database(DatabaseError::ConnectionFailed(_)))
    ));
}

// =============================================================================
// CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_create_budget() {
    let service = create_service(
        vec![],
        vec![],
        vec![create_test_category("cat_groceries", "Groceries")],
    );

    let created = service
        .create_budget(NewBudget {
            id: None,
            category_id: "cat_groceries".to_string(),
            period: period(2024, 3),
            planned: dec!(300),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(created.category_id, "cat_groceries");
    assert_eq!(created.period, period(2024, 3));
    assert_eq!(created.planned, dec!(300));
}

#[tokio::test]
async fn test_create_budget_rejects_unknown_category() {
    let service = create_service(vec![], vec![], vec![]);

    let result = service
        .create_budget(NewBudget {
            id: None,
            category_id: "cat_missing".to_string(),
            period: period(2024, 3),
            planned: dec!(300),
            notes: None,
        })
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_create_budget_rejects_non_positive_planned() {
    let service = create_service(
        vec![],
        vec![],
        vec![create_test_category("cat_groceries", "Groceries")],
    );

    let result = service
        .create_budget(NewBudget {
            id: None,
            category_id: "cat_groceries".to_string(),
            period: period(2024, 3),
            planned: dec!(0),
            notes: None,
        })
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_delete_budget_missing_is_not_found() {
    let service = create_service(vec![], vec![], vec![]);

    let result = service.delete_budget("bgt_missing").await;

    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

// =============================================================================
// Helper Functions
// =============================================================================

fn create_service(
    budgets: Vec<Budget>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
) -> BudgetService {
    BudgetService::new(
        Arc::new(MockBudgetRepository {
            budgets,
            fail_with_connection_error: false,
        }),
        Arc::new(MockTransactionRepository {
            transactions,
            fail_with_connection_error: false,
        }),
        Arc::new(MockCategoryRepository { categories }),
    )
}

fn period(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn create_test_category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        parent_id: None,
        color: DEFAULT_CATEGORY_COLOR.to_string(),
        is_active: true,
        created_at: Utc::now().naive_utc(),
    }
}

fn create_test_budget(id: &str, category_id: &str, period: Period, planned: Decimal) -> Budget {
    Budget {
        id: id.to_string(),
        category_id: category_id.to_string(),
        period,
        planned,
        notes: None,
        created_at: Utc::now().naive_utc(),
        updated_at: Utc::now().naive_utc(),
    }
}

fn create_test_transaction(
    category_id: Option<&str>,
    amount: Decimal,
    transaction_date: NaiveDate,
) -> Transaction {
    Transaction {
        id: format!("txn_{}_{}", transaction_date, amount),
        account_id: "acc_checking".to_string(),
        category_id: category_id.map(|id| id.to_string()),
        amount,
        date: transaction_date,
        description: None,
        reference: None,
        created_at: Utc::now().naive_utc(),
        updated_at: Utc::now().naive_utc(),
    }
}
