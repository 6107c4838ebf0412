use axum::{middleware, routing::get, Router};

use shared_resource::resource_routes;
use shared_utils::extractor::require_session;
use shared_utils::AppState;

use crate::filter::filter_appointments;
use crate::resource::APPOINTMENTS;

pub fn appointment_routes(state: AppState) -> Router {
    let filter = Router::new()
        .route("/filter", get(filter_appointments))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .with_state(state.clone());

    filter.merge(resource_routes(&APPOINTMENTS, state))
}
