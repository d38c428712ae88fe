use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use ledgerbook_core::transactions::{
    CategorySpending, MonthlyTotal, NewTransaction, Transaction, TransactionQuery,
    TransactionSummary, TransactionUpdate,
};

#[derive(serde::Deserialize)]
struct ListQuery {
    #[serde(rename = "accountId")]
    account_id: Option<String>,
    #[serde(rename = "categoryId")]
    category_id: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
}

impl ListQuery {
    /// Converts the wire parameters into a core `TransactionQuery`.
    ///
    /// `endDate` is inclusive on the wire and widened here to the
    /// half-open range the core layer expects.
    fn into_core(self) -> Result<TransactionQuery, ApiError> {
        let start_date = parse_date_param(self.start_date.as_deref(), "startDate")?;
        let end_date = match parse_date_param(self.end_date.as_deref(), "endDate")? {
            Some(date) => Some(
                date.succ_opt()
                    .ok_or_else(|| ApiError::BadRequest("endDate out of range".to_string()))?,
            ),
            None => None,
        };
        Ok(TransactionQuery {
            account_id: self.account_id,
            category_id: self.category_id,
            start_date,
            end_date,
        })
    }
}

fn parse_date_param(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    value
        .map(|v| {
            v.parse::<NaiveDate>().map_err(|_| {
                ApiError::BadRequest(format!("Invalid {}: expected YYYY-MM-DD", field))
            })
        })
        .transpose()
}

async fn list_transactions(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let query = query.into_core()?;
    let transactions = state.transaction_service.list_transactions(&query)?;
    Ok(Json(transactions))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get_transaction(&id)?;
    Ok(Json(transaction))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let created = state
        .transaction_service
        .create_transaction(payload)
        .await?;
    Ok(Json(created))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    payload.id = Some(id);
    let updated = state
        .transaction_service
        .update_transaction(payload)
        .await?;
    Ok(Json(updated))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.transaction_service.delete_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Signed income and expense totals over the filtered set.
async fn get_transaction_summary(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TransactionSummary>> {
    let query = query.into_core()?;
    let summary = state.transaction_service.get_summary(&query)?;
    Ok(Json(summary))
}

/// Per-category totals over the filtered set.
async fn get_spending_by_category(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategorySpending>>> {
    let query = query.into_core()?;
    let spending = state.transaction_service.spending_by_category(&query)?;
    Ok(Json(spending))
}

#[derive(serde::Deserialize)]
struct MonthlySummaryQuery {
    months: Option<u32>,
}

/// Month-by-month totals over the trailing window.
async fn get_monthly_summary(
    Query(query): Query<MonthlySummaryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MonthlyTotal>>> {
    let totals = state
        .transaction_service
        .monthly_totals(query.months.unwrap_or(12))?;
    Ok(Json(totals))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/summary", get(get_transaction_summary))
        .route("/transactions/by-category", get(get_spending_by_category))
        .route("/transactions/monthly-summary", get(get_monthly_summary))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
