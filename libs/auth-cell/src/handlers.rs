use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::info;

use shared_models::error::LOGIN_PATH;
use shared_models::session::{SessionStorage, JWT_TOKEN_KEY, ROLE_KEY, USERNAME_KEY};
use shared_utils::extractor::{lookup_session, CurrentSession};
use shared_utils::html::page;
use shared_utils::jwt::decode_payload;
use shared_utils::session::SESSION_COOKIE;
use shared_utils::AppState;

use crate::services::login::LoginService;
use crate::views::{login_page, session_details};

pub const HOME_PATH: &str = "/dashboard";

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub expired: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

async fn end_session(state: &AppState, jar: &CookieJar) {
    if let Some(entry) = lookup_session(state, jar).await {
        entry.storage.clear().await;
        state.sessions.remove(&entry.id).await;
    }
}

pub async fn login_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    if let Some(entry) = lookup_session(&state, &jar).await {
        if entry.storage.token().await.is_some() {
            return Redirect::to(HOME_PATH).into_response();
        }
    }

    let notice = query
        .expired
        .is_some()
        .then_some(("warning", "Sesión expirada. Vuelva a iniciar sesión."));

    Html(login_page(notice, "")).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    // The login call is unauthenticated, so it runs against a blank storage.
    let service = LoginService::new(state.client(&SessionStorage::new()));

    let response = match service.authenticate(&form.username, &form.password).await {
        Ok(response) => response,
        Err(err) => {
            let html = login_page(Some(("danger", err.user_message())), &form.username);
            return (err.status(), Html(html)).into_response();
        }
    };

    end_session(&state, &jar).await;

    let entry = state.sessions.create().await;
    entry.storage.set_item(USERNAME_KEY, response.username).await;
    entry.storage.set_item(JWT_TOKEN_KEY, response.token).await;
    if let Some(role) = response.role {
        entry.storage.set_item(ROLE_KEY, role).await;
    }

    let cookie = Cookie::build((SESSION_COOKIE, entry.id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), Redirect::to(HOME_PATH)).into_response()
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    end_session(&state, &jar).await;
    info!("User logged out");

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to(LOGIN_PATH),
    )
}

pub async fn session_page(Extension(session): Extension<CurrentSession>) -> Html<String> {
    let snapshot = session.storage.snapshot().await;
    let payload = snapshot.token.as_deref().and_then(decode_payload);

    let body = session_details(&snapshot, payload.as_ref());
    Html(page("Sesión", "/session", snapshot.username.as_deref(), &body))
}
