use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::router::appointment_routes;
use shared_utils::test_utils::{logged_in_session, MockBackendResponses, TestConfig};
use shared_utils::AppState;

fn create_test_app(state: AppState) -> Router {
    Router::new().nest("/appointments", appointment_routes(state))
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn mount_appointments(server: &MockServer) {
    let mut other = MockBackendResponses::appointment(3, "2025-10-20", "11:00", "Cancelada");
    other["paciente"] = json!({ "id": 4, "nombre": "Marta", "apellido": "Gil" });
    other["tipoCita"] = json!("Evaluación");

    Mock::given(method("GET"))
        .and(path("/citas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::appointment(1, "2025-10-24", "09:00", "Completada"),
            MockBackendResponses::appointment(2, "2025-10-24", "10:00", "Pendiente"),
            other
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_appointments_stats() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server).await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let response = create_test_app(state).oneshot(get("/appointments", &cookie)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<h3 id="totalCitas">3</h3>"#));
    assert!(html.contains(r#"<h3 id="citasHoy">2</h3>"#));
    assert!(html.contains(r#"<h3 id="citasCompletadas">1</h3>"#));
    assert!(html.contains(r#"<h3 id="citasCanceladas">1</h3>"#));
    assert!(html.contains(r#"<span class="badge bg-success">Completada</span>"#));
    assert!(html.contains(r#"id="filterForm""#));
}

#[tokio::test]
async fn test_search_filters_locally_and_restats() {
    let mock_server = MockServer::start().await;
    mount_appointments(&mock_server).await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let response = create_test_app(state)
        .oneshot(get("/appointments/search?q=MARTA", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<h3 id="totalCitas">1</h3>"#));
    assert!(html.contains("Evaluación"));
    assert!(!html.contains("Terapia individual"));
}

#[tokio::test]
async fn test_new_form_loads_lookups() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pacientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::patient(1, "Ana", "Ruiz")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/personal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::staff(2, "Luis", "Mora", "Psicología")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let response = create_test_app(state)
        .oneshot(get("/appointments/new", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<option value="1">Ana Ruiz (ID: 1)</option>"#));
    assert!(html.contains(r#"<option value="2">Luis Mora - Psicología (ID: 2)</option>"#));
    // Date defaults to the pinned test day.
    assert!(html.contains(r#"value="2025-10-24""#));
}

#[tokio::test]
async fn test_create_appointment_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/citas"))
        .and(body_json(json!({
            "paciente": { "id": 1 },
            "especialista": { "id": 2 },
            "fecha": "2025-10-24",
            "hora": "09:00",
            "tipoCita": "Consulta General",
            "estado": "Programada",
            "notas": "Primera visita"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            MockBackendResponses::appointment(9, "2025-10-24", "09:00", "Programada"),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let request = Request::builder()
        .method("POST")
        .uri("/appointments")
        .header(header::COOKIE, cookie)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "pacienteId=1&especialistaId=2&fecha=2025-10-24&hora=09:00&tipoCita=&estado=&notas=Primera+visita",
        ))
        .unwrap();

    let response = create_test_app(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/appointments?notice=created");
}

#[tokio::test]
async fn test_create_appointment_missing_time_makes_no_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/citas"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pacientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/personal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let request = Request::builder()
        .method("POST")
        .uri("/appointments")
        .header(header::COOKIE, cookie)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("pacienteId=1&especialistaId=2&fecha=2025-10-24&hora="))
        .unwrap();

    let response = create_test_app(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Paciente, Especialista, Fecha y Hora son requeridos"));
}

#[tokio::test]
async fn test_filter_uses_combined_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/citas/especialista/2/fecha/2025-10-24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::appointment(1, "2025-10-24", "09:00", "Pendiente")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let response = create_test_app(state)
        .oneshot(get(
            "/appointments/filter?estado=Pendiente&fecha=2025-10-24&paciente=&especialista=2",
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Filtro aplicado"));
    assert!(html.contains(r#"<h3 id="citasPendientes">1</h3>"#));
}

#[tokio::test]
async fn test_filter_requires_session() {
    let mock_server = MockServer::start().await;
    let state = TestConfig::with_backend(mock_server.uri()).to_state();

    let response = create_test_app(state)
        .oneshot(Request::builder().uri("/appointments/filter").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn test_edit_form_keeps_unlisted_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/citas/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::appointment(7, "2025-10-24", "09:00", "Reprogramada"),
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pacientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::patient(1, "Ana", "Ruiz")
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/personal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_backend(mock_server.uri()).to_state();
    let (cookie, _) = logged_in_session(&state, "token").await;

    let response = create_test_app(state)
        .oneshot(get("/appointments/7/edit", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"<option value="Reprogramada" selected>Reprogramada</option>"#));
    assert!(html.contains(r#"<option value="1" selected>Ana Ruiz (ID: 1)</option>"#));
    // The specialist list is empty, but the stored id stays selectable.
    assert!(html.contains(r#"<option value="2" selected>2</option>"#));
}
