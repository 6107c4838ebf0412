use axum::{middleware, routing::{get, post}, Router};
use serde::{de::DeserializeOwned, Serialize};

use shared_utils::extractor::require_session;
use shared_utils::AppState;

use crate::config::ResourceConfig;
use crate::handlers::*;

/// Routes for one entity, meant to be nested at `config.base_path`.
pub fn resource_routes<T>(config: &'static ResourceConfig<T>, state: AppState) -> Router
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let resource_state = ResourceState {
        app: state.clone(),
        config,
    };

    Router::new()
        .route("/", get(list_page::<T>).post(create::<T>))
        .route("/search", get(search::<T>))
        .route("/new", get(new_form::<T>))
        .route("/{id}", get(detail::<T>).post(update::<T>))
        .route("/{id}/edit", get(edit_form::<T>))
        .route("/{id}/delete", post(delete::<T>))
        .layer(middleware::from_fn_with_state(state, require_session))
        .with_state(resource_state)
}
