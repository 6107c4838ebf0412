use axum::Router;

use shared_resource::resource_routes;
use shared_utils::AppState;

use crate::resource::PATIENTS;

pub fn patient_routes(state: AppState) -> Router {
    resource_routes(&PATIENTS, state)
}
