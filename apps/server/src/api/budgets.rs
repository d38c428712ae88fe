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
use ledgerbook_core::budgets::{Budget, BudgetSummary, BudgetUpdate, NewBudget, Period};

#[derive(serde::Deserialize)]
struct ListQuery {
    period: Option<String>,
    #[serde(rename = "categoryId")]
    category_id: Option<String>,
}

#[derive(serde::Deserialize)]
struct SummaryQuery {
    period: Option<String>,
    /// Comma-separated category IDs, empty means all categories.
    categories: Option<String>,
}

async fn list_budgets(
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Budget>>> {
    let period = query
        .period
        .as_deref()
        .map(str::parse::<Period>)
        .transpose()?;
    let budgets = state
        .budget_service
        .list_budgets(period, query.category_id.as_deref())?;
    Ok(Json(budgets))
}

async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.get_budget(&id)?;
    Ok(Json(budget))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let created = state.budget_service.create_budget(payload).await?;
    Ok(Json(created))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    payload.id = Some(id);
    let updated = state.budget_service.update_budget(payload).await?;
    Ok(Json(updated))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Planned versus actual figures for every budgeted or spending
/// category in the requested period.
async fn get_budget_summary(
    Query(query): Query<SummaryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetSummary>>> {
    let period_param = query
        .period
        .ok_or_else(|| ApiError::BadRequest("Missing required parameter: period".to_string()))?;
    let period: Period = period_param.parse()?;
    let category_filter: Vec<String> = query
        .categories
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let summary = state
        .budget_service
        .budget_summary(period, &category_filter)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/summary", get(get_budget_summary))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}
