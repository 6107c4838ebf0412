use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};

use shared_client::BackendClient;
use shared_config::AppConfig;
use shared_models::session::SessionStorage;

use crate::session::SessionRegistry;

/// State shared by every router of the front end.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionRegistry,
    http: reqwest::Client,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: SessionRegistry::new(),
            http: reqwest::Client::new(),
            fixed_today: None,
        }
    }

    /// Pins the date used for "today" computations.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Backend client bound to one session's storage.
    pub fn client(&self, session: &SessionStorage) -> BackendClient {
        BackendClient::with_http(self.http.clone(), &self.config, session.clone())
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.config.search_debounce_ms)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.config.session_idle_minutes * 60)
    }
}
