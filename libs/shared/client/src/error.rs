use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Sesión expirada o token inválido (HTTP {status})")]
    SessionExpired { status: u16 },

    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response body: expected JSON")]
    UnexpectedBody,

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired { .. })
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::SessionExpired { .. } => AppError::SessionExpired,
            ClientError::Transport(e) => {
                AppError::ExternalService(format!("No se pudo conectar con el servidor: {}", e))
            }
            other => AppError::ExternalService(other.to_string()),
        }
    }
}
