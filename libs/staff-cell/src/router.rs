use axum::Router;

use shared_resource::resource_routes;
use shared_utils::AppState;

use crate::resource::STAFF;

pub fn staff_routes(state: AppState) -> Router {
    resource_routes(&STAFF, state)
}
