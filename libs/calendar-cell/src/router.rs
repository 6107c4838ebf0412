use axum::{middleware, routing::get, Router};

use shared_utils::extractor::require_session;
use shared_utils::AppState;

use crate::handlers::calendar_page;

pub fn calendar_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(calendar_page))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}
