//! REST API surface.
//!
//! Each resource module exposes a `router()`; `app_router` merges them
//! under `/api/v1` and applies the shared middleware stack.

mod accounts;
mod budgets;
mod categories;
mod transactions;

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, error::ApiResult, main_lib::AppState};

async fn healthz() -> &'static str {
    "ok"
}

/// Readiness requires a usable connection from the pool.
async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    ledgerbook_storage_sqlite::get_connection(&state.pool)?;
    Ok("ok")
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().unwrap())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(accounts::router())
        .merge(categories::router())
        .merge(transactions::router())
        .merge(budgets::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
