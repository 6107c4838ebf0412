use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use shared_models::error::AppError;
use shared_utils::extractor::CurrentSession;
use shared_utils::html::{alert, page};
use shared_utils::search::Debounced;
use shared_utils::AppState;

use crate::config::ResourceConfig;
use crate::controller::{LookupOptions, ResourceController};
use crate::form::FormData;
use crate::views;

pub struct ResourceState<T: 'static> {
    pub app: AppState,
    pub config: &'static ResourceConfig<T>,
}

impl<T> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            config: self.config,
        }
    }
}

impl<T> ResourceState<T>
where
    T: Serialize + DeserializeOwned,
{
    fn controller(&self, session: &CurrentSession) -> ResourceController<T> {
        ResourceController::new(self.config, self.app.client(&session.storage))
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

async fn render_page(session: &CurrentSession, title: &str, active: &str, body: &str) -> Html<String> {
    let username = session.storage.snapshot().await.username;
    Html(page(title, active, username.as_deref(), body))
}

fn notice_text<T>(config: &ResourceConfig<T>, key: &str) -> Option<&'static str> {
    match key {
        "created" => Some(config.notices.created),
        "updated" => Some(config.notices.updated),
        "deleted" => Some(config.notices.deleted),
        _ => None,
    }
}

pub async fn list_page<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let controller = state.controller(&session);
    let today = state.app.today();

    let records = controller.list().await?;
    let stats = controller.stats(&records, today);
    let notice = query.notice.as_deref().and_then(|key| notice_text(state.config, key));

    let body = views::render_list(state.config, &records, &stats, notice, today);
    Ok(render_page(&session, state.config.title, state.config.base_path, &body).await)
}

/// Debounced per session; a superseded search answers 204 and renders nothing.
pub async fn search<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let controller = state.controller(&session);
    let today = state.app.today();
    let debouncer = session
        .debouncer(state.config.endpoint, state.app.search_delay())
        .await;

    let outcome = debouncer.run(|| controller.search(&query.q)).await;

    let records = match outcome {
        Debounced::Applied(result) => result?,
        Debounced::Superseded => {
            debug!("Search '{}' on {} superseded", query.q, state.config.endpoint);
            return Ok(StatusCode::NO_CONTENT.into_response());
        }
    };

    let stats = state
        .config
        .restats_on_search()
        .then(|| controller.stats(&records, today));

    Ok(Html(views::render_results(state.config, &records, stats.as_deref(), today)).into_response())
}

async fn form_page<T>(
    state: &ResourceState<T>,
    session: &CurrentSession,
    title: &str,
    action: &str,
    values: &FormData,
    error: Option<&str>,
) -> Result<Html<String>, AppError>
where
    T: Serialize + DeserializeOwned,
{
    let options: LookupOptions = state.controller(session).lookup_options().await?;
    let alert = error.map(|msg| alert("danger", msg)).unwrap_or_default();
    let form = views::render_form(state.config, action, values, &options, state.app.today());
    let body = format!("{}{}", alert, form);
    Ok(render_page(session, title, state.config.base_path, &body).await)
}

/// A rejected submission keeps the form open with what the user typed.
async fn rejected_form<T>(
    state: &ResourceState<T>,
    session: &CurrentSession,
    title: &str,
    action: &str,
    values: &FormData,
    err: AppError,
) -> Result<Response, AppError>
where
    T: Serialize + DeserializeOwned,
{
    if let AppError::SessionExpired = err {
        return Err(err);
    }
    warn!("{} form rejected: {}", state.config.title, err);
    let html = form_page(state, session, title, action, values, Some(err.user_message())).await?;
    Ok((err.status(), html).into_response())
}

pub async fn new_form<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Html<String>, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let title = format!("{} - Nuevo", state.config.title);
    form_page(&state, &session, &title, state.config.base_path, &FormData::new(), None).await
}

pub async fn create<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
    Form(form): Form<FormData>,
) -> Result<Response, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    match state.controller(&session).create(&form).await {
        Ok(_) => Ok(Redirect::to(&format!("{}?notice=created", state.config.base_path)).into_response()),
        Err(err) => {
            let title = format!("{} - Nuevo", state.config.title);
            rejected_form(&state, &session, &title, state.config.base_path, &form, err).await
        }
    }
}

pub async fn detail<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let record = state.controller(&session).get(id).await?;
    let body = views::render_detail(state.config, &record);
    let title = format!("{} #{}", state.config.title, id);
    Ok(render_page(&session, &title, state.config.base_path, &body).await)
}

pub async fn edit_form<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let record = state.controller(&session).get(id).await?;
    let values = (state.config.to_form)(&record);
    let title = format!("{} - Editar #{}", state.config.title, id);
    let action = format!("{}/{}", state.config.base_path, id);
    form_page(&state, &session, &title, &action, &values, None).await
}

pub async fn update<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<i64>,
    Form(form): Form<FormData>,
) -> Result<Response, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    match state.controller(&session).update(id, &form).await {
        Ok(_) => Ok(Redirect::to(&format!("{}?notice=updated", state.config.base_path)).into_response()),
        Err(err) => {
            let title = format!("{} - Editar #{}", state.config.title, id);
            let action = format!("{}/{}", state.config.base_path, id);
            rejected_form(&state, &session, &title, &action, &form, err).await
        }
    }
}

pub async fn delete<T>(
    State(state): State<ResourceState<T>>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    state.controller(&session).delete(id).await?;
    Ok(Redirect::to(&format!("{}?notice=deleted", state.config.base_path)))
}
