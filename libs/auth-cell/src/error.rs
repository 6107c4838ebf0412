use axum::http::StatusCode;
use thiserror::Error;

use shared_client::ClientError;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Missing username or password")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login rejected: {0}")]
    Rejected(String),

    #[error("Backend unreachable: {0}")]
    Unreachable(String),
}

impl LoginError {
    pub fn status(&self) -> StatusCode {
        match self {
            LoginError::MissingCredentials => StatusCode::BAD_REQUEST,
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::Rejected(_) | LoginError::Unreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            LoginError::MissingCredentials => "Ingrese usuario y contraseña.",
            LoginError::InvalidCredentials => "Credenciales incorrectas.",
            LoginError::Rejected(_) => "Error al iniciar sesión.",
            LoginError::Unreachable(_) => "No se pudo conectar con el servidor.",
        }
    }
}

impl From<ClientError> for LoginError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http { status: 401, .. } => LoginError::InvalidCredentials,
            ClientError::Transport(e) => LoginError::Unreachable(e.to_string()),
            other => LoginError::Rejected(other.to_string()),
        }
    }
}
