use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::html::escape;

pub const LOGIN_PATH: &str = "/login";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Sesión expirada o token inválido")]
    SessionExpired,

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SessionExpired => StatusCode::SEE_OTHER,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Text shown to the user in the error panel.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::SessionExpired => "Sesión expirada. Vuelva a iniciar sesión.",
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Internal(msg)
            | AppError::ExternalService(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::SessionExpired = self {
            tracing::warn!("Session rejected, redirecting to {}", LOGIN_PATH);
            return Redirect::to(&format!("{}?expired=1", LOGIN_PATH)).into_response();
        }

        let status = self.status();
        let message = self.user_message();

        tracing::error!("Error: {}: {}", status, message);

        let body = format!(
            r#"<div class="alert alert-danger text-center py-4" role="alert"><i class="bi bi-exclamation-triangle fs-1 d-block mb-2"></i><em>{}</em><p class="small mt-2"><a href="javascript:history.back()">Volver</a></p></div>"#,
            escape(message)
        );

        (status, [(header::CACHE_CONTROL, "no-store")], Html(body)).into_response()
    }
}
