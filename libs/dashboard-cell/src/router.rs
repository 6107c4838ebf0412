use axum::{middleware, routing::get, Router};

use shared_utils::extractor::require_session;
use shared_utils::AppState;

use crate::handlers::{dashboard_page, reports_page};

pub fn dashboard_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_page))
        .route("/reports", get(reports_page))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}
