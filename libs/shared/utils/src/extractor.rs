use std::ops::Deref;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use shared_models::error::LOGIN_PATH;

use crate::session::{SessionEntry, SESSION_COOKIE};
use crate::state::AppState;

/// Session of the current request, inserted by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Arc<SessionEntry>);

impl Deref for CurrentSession {
    type Target = SessionEntry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Looks up the session named by the request cookie.
pub async fn lookup_session(state: &AppState, jar: &CookieJar) -> Option<Arc<SessionEntry>> {
    let id = jar.get(SESSION_COOKIE)?.value().to_string();
    state.sessions.get(&id).await
}

// Middleware for protected pages: no session token means back to login.
// A session whose token is gone, before or after the handler, is dropped.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let entry = match lookup_session(&state, &jar).await {
        Some(entry) => entry,
        None => {
            debug!("No session cookie for {}, redirecting to login", request.uri());
            return Redirect::to(LOGIN_PATH).into_response();
        }
    };

    if entry.storage.token().await.is_none() {
        debug!("Session {} has no token, redirecting to login", entry.id);
        state.sessions.remove(&entry.id).await;
        return Redirect::to(LOGIN_PATH).into_response();
    }

    entry.touch();
    request.extensions_mut().insert(CurrentSession(entry.clone()));

    let response = next.run(request).await;

    if entry.storage.token().await.is_none() {
        state.sessions.remove(&entry.id).await;
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{header, Request as HttpRequest, StatusCode}, middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    use crate::test_utils::{logged_in_session, TestConfig};

    fn protected_app(state: AppState) -> Router {
        Router::new()
            .route("/", get(|Extension(session): Extension<CurrentSession>| async move { session.id.clone() }))
            .route(
                "/expire",
                get(|Extension(session): Extension<CurrentSession>| async move {
                    session.storage.clear().await;
                    StatusCode::SEE_OTHER
                }),
            )
            .layer(middleware::from_fn_with_state(state.clone(), require_session))
            .with_state(state)
    }

    #[tokio::test]
    async fn missing_cookie_redirects_to_login() {
        let state = TestConfig::default().to_state();
        let response = protected_app(state)
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn cleared_session_redirects_to_login() {
        let state = TestConfig::default().to_state();
        let (cookie, entry) = logged_in_session(&state, "token").await;
        entry.storage.clear().await;

        let response = protected_app(state.clone())
            .oneshot(HttpRequest::builder().uri("/").header(header::COOKIE, cookie).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.sessions.get(&entry.id).await.is_none());
    }

    #[tokio::test]
    async fn session_cleared_by_handler_is_dropped() {
        let state = TestConfig::default().to_state();
        let (cookie, entry) = logged_in_session(&state, "token").await;

        let response = protected_app(state.clone())
            .oneshot(HttpRequest::builder().uri("/expire").header(header::COOKIE, cookie).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(state.sessions.get(&entry.id).await.is_none());
    }

    #[tokio::test]
    async fn valid_session_reaches_handler() {
        let state = TestConfig::default().to_state();
        let (cookie, entry) = logged_in_session(&state, "token").await;

        let response = protected_app(state.clone())
            .oneshot(HttpRequest::builder().uri("/").header(header::COOKIE, cookie).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, entry.id.as_bytes());
        assert!(state.sessions.get(&entry.id).await.is_some());
    }
}
