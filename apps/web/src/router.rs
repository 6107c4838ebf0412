use axum::{response::Redirect, routing::get, Router};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use calendar_cell::router::calendar_routes;
use dashboard_cell::router::dashboard_routes;
use patient_cell::router::patient_routes;
use shared_utils::AppState;
use staff_cell::router::staff_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .merge(auth_routes(state.clone()))
        .merge(dashboard_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/staff", staff_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/calendar", calendar_routes(state))
}
