pub mod reports;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // API (JSON for charts)
        .route(
            "/api/reports/transactions-overview",
            post(reports::transactions_overview_report),
        )
        .route("/api/reports/time-series", post(reports::time_series))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
