use tracing::{debug, info, warn};

use shared_client::BackendClient;
use shared_models::auth::{LoginRequest, LoginResponse};

use crate::error::LoginError;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

pub struct LoginService {
    client: BackendClient,
}

impl LoginService {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse, LoginError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        debug!("Authenticating {}", username);
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };

        match self.client.post_public(LOGIN_ENDPOINT, &request).await {
            Ok(response) => {
                info!("User {} logged in", username);
                Ok(response)
            }
            Err(err) => {
                let err = LoginError::from(err);
                warn!("Login failed for {}: {}", username, err);
                Err(err)
            }
        }
    }
}
