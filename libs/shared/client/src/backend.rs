use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::session::SessionStorage;

use crate::error::ClientError;

/// Body of a successful backend response, interpreted by content-type.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Empty,
    Json(Value),
    Text(String),
}

impl ApiResponse {
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        match self {
            ApiResponse::Json(value) => Ok(serde_json::from_value(value)?),
            _ => Err(ClientError::UnexpectedBody),
        }
    }

    /// Collections: a 204 or a JSON `null` is an empty list.
    pub fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>, ClientError> {
        match self {
            ApiResponse::Empty | ApiResponse::Json(Value::Null) => Ok(Vec::new()),
            ApiResponse::Json(value) => Ok(serde_json::from_value(value)?),
            ApiResponse::Text(_) => Err(ClientError::UnexpectedBody),
        }
    }
}

/// Authenticated client for the clinic backend.
///
/// The bearer token is read from the session storage on every call. A 401 or
/// 403 answer clears that storage and surfaces as
/// [`ClientError::SessionExpired`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    session: SessionStorage,
}

impl BackendClient {
    pub fn new(config: &AppConfig, session: SessionStorage) -> Self {
        Self::with_http(Client::new(), config, session)
    }

    pub fn with_http(client: Client, config: &AppConfig, session: SessionStorage) -> Self {
        Self {
            client,
            base_url: config.api_base_url.clone(),
            session,
        }
    }

    async fn get_headers(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token().await {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let headers = self.get_headers().await?;

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await.map_err(|e| {
            error!("Network error calling {}: {}", url, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Backend rejected session token ({}) for {}", status, path);
            self.session.clear().await;
            return Err(ClientError::SessionExpired { status: status.as_u16() });
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}) for {}: {}", status, path, error_text);

            return Err(ClientError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(ApiResponse::Empty);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("json"))
            .unwrap_or(false);

        let text = response.text().await?;

        if is_json {
            if text.trim().is_empty() {
                return Ok(ApiResponse::Empty);
            }
            let value = serde_json::from_str(&text).map_err(|e| {
                error!("Invalid JSON from {}: {}", path, e);
                ClientError::Decode(e)
            })?;
            Ok(ApiResponse::Json(value))
        } else {
            Ok(ApiResponse::Text(text))
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None).await?.into_json()
    }

    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        self.request(Method::GET, path, None).await?.into_list()
    }

    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        let body = serde_json::to_value(body)?;
        self.request(method, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.request(Method::DELETE, path, None).await
    }

    /// Unauthenticated POST. Status codes are reported as-is, a 401 here means
    /// rejected credentials rather than an expired session.
    pub async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making public POST request to {}", url);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("Network error calling {}: {}", url, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("API error ({}) for {}: {}", status, path, text);
            return Err(ClientError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
