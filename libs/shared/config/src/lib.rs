use std::env;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_APPOINTMENT_UNIT_PRICE: u32 = 50;
pub const DEFAULT_SESSION_IDLE_MINUTES: u64 = 480;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origin of the clinic REST backend, without trailing slash.
    pub api_base_url: String,
    pub bind_addr: String,
    pub search_debounce_ms: u64,
    /// Flat rate used for the revenue placeholder metric.
    pub appointment_unit_price: u32,
    /// Sessions without a request for this long are dropped.
    pub session_idle_minutes: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CLINIC_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_BASE_URL not set, using empty value");
                    String::new()
                }),
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| {
                    warn!("BIND_ADDR not set, using default");
                    DEFAULT_BIND_ADDR.to_string()
                }),
            search_debounce_ms: parse_or("SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS),
            appointment_unit_price: parse_or("APPOINTMENT_UNIT_PRICE", DEFAULT_APPOINTMENT_UNIT_PRICE),
            session_idle_minutes: parse_or("SESSION_IDLE_MINUTES", DEFAULT_SESSION_IDLE_MINUTES),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            appointment_unit_price: DEFAULT_APPOINTMENT_UNIT_PRICE,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value ({}), using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_trimmed() {
        let config = AppConfig::with_base_url("http://localhost:8080/");
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert!(config.is_configured());
    }

    #[test]
    fn empty_base_url_is_not_configured() {
        let config = AppConfig::with_base_url("");
        assert!(!config.is_configured());
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.appointment_unit_price, 50);
        assert_eq!(config.session_idle_minutes, 480);
    }
}
