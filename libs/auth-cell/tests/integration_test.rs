use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::router::auth_routes;
use shared_models::session::{JWT_TOKEN_KEY, ROLE_KEY, USERNAME_KEY};
use shared_utils::session::SESSION_COOKIE;
use shared_utils::test_utils::{logged_in_session, JwtTestUtils, MockBackendResponses, TestConfig, TestUser};
use shared_utils::AppState;

fn create_test_app(state: AppState) -> Router {
    auth_routes(state)
}

fn login_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn session_id(response: &axum::response::Response) -> String {
    let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    let pair = set_cookie.split(';').next().unwrap();
    let (name, value) = pair.split_once('=').unwrap();
    assert_eq!(name, SESSION_COOKIE);
    value.to_string()
}

#[tokio::test]
async fn test_login_stores_session_and_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "recepcion", "password": "secreto" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::login_response("recepcion", "jwt-123", "ADMIN")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let response = create_test_app(state.clone())
        .oneshot(login_request("username=recepcion&password=secreto"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");

    let entry = state.sessions.get(&session_id(&response)).await.unwrap();
    assert_eq!(entry.storage.get_item(JWT_TOKEN_KEY).await.as_deref(), Some("jwt-123"));
    assert_eq!(entry.storage.get_item(USERNAME_KEY).await.as_deref(), Some("recepcion"));
    assert_eq!(entry.storage.get_item(ROLE_KEY).await.as_deref(), Some("ADMIN"));
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let response = create_test_app(state.clone())
        .oneshot(login_request("username=recepcion&password=mal"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Credenciales incorrectas."));
    assert!(html.contains(r#"value="recepcion""#));
    assert_eq!(state.sessions.len().await, 0);
}

#[tokio::test]
async fn test_login_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let response = create_test_app(state)
        .oneshot(login_request("username=recepcion&password=secreto"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_text(response).await.contains("Error al iniciar sesión."));
}

#[tokio::test]
async fn test_login_unreachable_backend() {
    // Nothing listens on this port.
    let state = TestConfig::with_backend("http://127.0.0.1:9").to_state();
    let response = create_test_app(state)
        .oneshot(login_request("username=recepcion&password=secreto"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_text(response).await.contains("No se pudo conectar con el servidor."));
}

#[tokio::test]
async fn test_login_without_password_makes_no_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let response = create_test_app(state)
        .oneshot(login_request("username=recepcion&password="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expired_notice_on_login_page() {
    let state = TestConfig::default().to_state();
    let response = create_test_app(state)
        .oneshot(Request::builder().uri("/login?expired=1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Sesión expirada. Vuelva a iniciar sesión."));
}

#[tokio::test]
async fn test_login_page_redirects_when_logged_in() {
    let state = TestConfig::default().to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let response = create_test_app(state)
        .oneshot(Request::builder().uri("/login").header(header::COOKIE, cookie).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let state = TestConfig::default().to_state();
    let (cookie, entry) = logged_in_session(&state, "token").await;

    let response = create_test_app(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    assert!(entry.storage.token().await.is_none());
    assert!(state.sessions.get(&entry.id).await.is_none());
}

#[tokio::test]
async fn test_session_page_shows_decoded_payload() {
    let state = TestConfig::default().to_state();
    let token = JwtTestUtils::create_test_token(&TestUser::admin("recepcion"), "secret", Some(1));
    let (cookie, _) = logged_in_session(&state, &token).await;

    let response = create_test_app(state)
        .oneshot(Request::builder().uri("/session").header(header::COOKIE, cookie).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&token));
    assert!(html.contains("&quot;sub&quot;: &quot;recepcion&quot;"));
}

#[tokio::test]
async fn test_session_page_with_opaque_token() {
    let state = TestConfig::default().to_state();
    let (cookie, _) = logged_in_session(&state, "opaque").await;

    let response = create_test_app(state)
        .oneshot(Request::builder().uri("/session").header(header::COOKIE, cookie).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(body_text(response).await.contains("no decodificable"));
}

#[tokio::test]
async fn test_session_page_requires_login() {
    let state = TestConfig::default().to_state();

    let response = create_test_app(state)
        .oneshot(Request::builder().uri("/session").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}
