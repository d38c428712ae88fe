use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use ledgerbook_core::accounts::{AccountSummary, AccountUpdate, AccountWithBalance, NewAccount};

#[derive(serde::Deserialize)]
struct ListQuery {
    #[serde(rename = "isActive")]
    is_active: Option<bool>,
}

/// List accounts with their derived balances.
async fn list_accounts(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AccountWithBalance>>> {
    let accounts = state.account_service.list_accounts(query.is_active)?;
    Ok(Json(accounts))
}

async fn get_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AccountWithBalance>> {
    let account = state.account_service.get_account(&id)?;
    Ok(Json(account))
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAccount>,
) -> ApiResult<Json<AccountWithBalance>> {
    let created = state.account_service.create_account(payload).await?;
    Ok(Json(created))
}

async fn update_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<AccountUpdate>,
) -> ApiResult<Json<AccountWithBalance>> {
    payload.id = Some(id);
    let updated = state.account_service.update_account(payload).await?;
    Ok(Json(updated))
}

async fn delete_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.account_service.delete_account(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Aggregate balance totals across active accounts.
async fn get_account_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AccountSummary>> {
    let summary = state.account_service.get_summary()?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/summary", get(get_account_summary))
        .route(
            "/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}
