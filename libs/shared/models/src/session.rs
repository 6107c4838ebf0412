use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

pub const JWT_TOKEN_KEY: &str = "jwtToken";
pub const USERNAME_KEY: &str = "username";
pub const ROLE_KEY: &str = "role";

/// Key/value store scoped to one browser session.
///
/// Cloning yields another handle to the same storage, so a handle given to a
/// backend client sees (and can clear) the values written at login.
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }

    pub async fn set_item(&self, key: &str, value: impl Into<String>) {
        self.items.write().await.insert(key.to_string(), value.into());
    }

    pub async fn clear(&self) {
        self.items.write().await.clear();
    }

    pub async fn token(&self) -> Option<String> {
        self.get_item(JWT_TOKEN_KEY).await.filter(|token| !token.is_empty())
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let items = self.items.read().await;
        SessionSnapshot {
            token: items.get(JWT_TOKEN_KEY).cloned(),
            username: items.get(USERNAME_KEY).cloned(),
            role: items.get(ROLE_KEY).cloned(),
        }
    }
}

/// Point-in-time copy of the well-known session keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
}
