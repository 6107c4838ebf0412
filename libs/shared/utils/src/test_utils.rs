use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, NaiveDate, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

use shared_config::AppConfig;
use shared_models::session::{JWT_TOKEN_KEY, ROLE_KEY, USERNAME_KEY};

use crate::session::{SessionEntry, SESSION_COOKIE};
use crate::state::AppState;

pub struct TestConfig {
    pub api_base_url: String,
    pub today: NaiveDate,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            today: NaiveDate::from_ymd_opt(2025, 10, 24).unwrap_or_default(),
        }
    }
}

impl TestConfig {
    pub fn with_backend(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        let mut config = AppConfig::with_base_url(self.api_base_url.clone());
        // Keep router tests quick; debounce timing is covered in search.rs.
        config.search_debounce_ms = 10;
        config
    }

    pub fn to_state(&self) -> AppState {
        AppState::new(self.to_app_config()).with_today(self.today)
    }
}

pub struct TestUser {
    pub username: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            username: "recepcion".to_string(),
            role: "USER".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(username: &str, role: &str) -> Self {
        Self {
            username: username.to_string(),
            role: role.to_string(),
        }
    }

    pub fn admin(username: &str) -> Self {
        Self::new(username, "ADMIN")
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.username,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Registers a logged-in session and returns the `Cookie` header value for it.
pub async fn logged_in_session(state: &AppState, token: &str) -> (String, Arc<SessionEntry>) {
    let entry = state.sessions.create().await;
    entry.storage.set_item(JWT_TOKEN_KEY, token).await;
    entry.storage.set_item(USERNAME_KEY, "recepcion").await;
    entry.storage.set_item(ROLE_KEY, "ADMIN").await;
    (format!("{}={}", SESSION_COOKIE, entry.id), entry)
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn patient(id: i64, nombre: &str, apellido: &str) -> Value {
        json!({
            "id": id,
            "nombre": nombre,
            "apellido": apellido,
            "fechaNacimiento": "2000-06-15",
            "genero": "Femenino",
            "telefono": "600123123",
            "email": format!("{}@example.com", nombre.to_lowercase()),
            "fechaCreacion": "2025-10-02T09:30:00"
        })
    }

    pub fn staff(id: i64, nombre: &str, apellido: &str, especialidad: &str) -> Value {
        json!({
            "id": id,
            "nombre": nombre,
            "apellido": apellido,
            "numeroDni": "12345678A",
            "email": format!("{}@clinic.example", nombre.to_lowercase()),
            "telefono": "910000000",
            "especialidad": especialidad,
            "genero": "Masculino",
            "numeroLicencia": "LIC-001",
            "lugarEstudio": "Universidad Complutense"
        })
    }

    pub fn appointment(id: i64, fecha: &str, hora: &str, estado: &str) -> Value {
        json!({
            "id": id,
            "fecha": fecha,
            "hora": hora,
            "tipoCita": "Terapia individual",
            "estado": estado,
            "notas": null,
            "motivo": "Ansiedad",
            "paciente": { "id": 1, "nombre": "Ana", "apellido": "Ruiz" },
            "especialista": { "id": 2, "nombre": "Luis", "apellido": "Mora", "especialidad": "Psicología" }
        })
    }

    pub fn login_response(username: &str, token: &str, role: &str) -> Value {
        json!({
            "username": username,
            "token": token,
            "role": role
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.api_base_url, "http://localhost:8080");
        assert!(app_config.is_configured());
    }

    #[test]
    fn test_jwt_token_creation() {
        let user = TestUser::default();
        let token = JwtTestUtils::create_test_token(&user, "test-secret", Some(1));

        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_logged_in_session_cookie() {
        let state = TestConfig::default().to_state();
        let (cookie, entry) = logged_in_session(&state, "abc").await;

        assert_eq!(cookie, format!("psicoclinic_session={}", entry.id));
        assert_eq!(entry.storage.token().await.as_deref(), Some("abc"));
        assert_eq!(state.today(), NaiveDate::from_ymd_opt(2025, 10, 24).unwrap());
    }
}
