use std::collections::HashMap;

use chrono::NaiveDate;
use futures::future::try_join_all;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use shared_client::{ApiResponse, BackendClient, ClientError};
use shared_models::error::AppError;

use crate::config::{ResourceConfig, SearchMode, Stat};
use crate::form::FormData;

/// Options for lookup fields, keyed by field name: `(id, label)` pairs.
pub type LookupOptions = HashMap<&'static str, Vec<(String, String)>>;

pub struct ResourceController<T: 'static> {
    config: &'static ResourceConfig<T>,
    client: BackendClient,
}

impl<T> ResourceController<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(config: &'static ResourceConfig<T>, client: BackendClient) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &'static ResourceConfig<T> {
        self.config
    }

    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        debug!("Loading all records from {}", self.config.endpoint);
        self.client.get_list(self.config.endpoint).await
    }

    /// Exactly one backend query: the full list for an empty term, otherwise
    /// the name query (remote) or the full list filtered here (local).
    pub async fn search(&self, term: &str) -> Result<Vec<T>, ClientError> {
        let term = term.trim();

        if term.is_empty() {
            return self.list().await;
        }

        match &self.config.search {
            SearchMode::Remote { path, param } => {
                let path = format!("{}?{}={}", path, param, urlencoding::encode(term));
                debug!("Searching {}", path);
                self.client.get_list(&path).await
            }
            SearchMode::Local { matches } => {
                let needle = term.to_lowercase();
                let records = self.list().await?;
                Ok(records.into_iter().filter(|record| matches(record, &needle)).collect())
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<T, ClientError> {
        let path = format!("{}/{}", self.config.endpoint, id);
        self.client.get_json(&path).await
    }

    /// Required-field check and payload mapping. Never touches the network.
    pub fn validate(&self, form: &FormData) -> Result<T, AppError> {
        let missing = form.missing(self.config.required_fields);
        if !missing.is_empty() {
            debug!("Form for {} missing fields: {:?}", self.config.endpoint, missing);
            return Err(AppError::ValidationError(self.config.required_message.to_string()));
        }

        (self.config.from_form)(form).map_err(AppError::ValidationError)
    }

    pub async fn create(&self, form: &FormData) -> Result<ApiResponse, AppError> {
        let payload = self.validate(form)?;
        let response = self
            .client
            .send(Method::POST, self.config.endpoint, &payload)
            .await?;
        info!("Created record in {}", self.config.endpoint);
        Ok(response)
    }

    pub async fn update(&self, id: i64, form: &FormData) -> Result<ApiResponse, AppError> {
        let payload = self.validate(form)?;
        let path = format!("{}/{}", self.config.endpoint, id);
        let response = self.client.send(Method::PUT, &path, &payload).await?;
        info!("Updated record {} in {}", id, self.config.endpoint);
        Ok(response)
    }

    pub async fn delete(&self, id: i64) -> Result<ApiResponse, ClientError> {
        let path = format!("{}/{}", self.config.endpoint, id);
        let response = self.client.delete(&path).await?;
        info!("Deleted record {} from {}", id, self.config.endpoint);
        Ok(response)
    }

    /// Loads every lookup field's options concurrently.
    pub async fn lookup_options(&self) -> Result<LookupOptions, ClientError> {
        let fields: Vec<_> = self.config.lookup_fields().collect();

        let lists = try_join_all(
            fields
                .iter()
                .map(|(_, endpoint, _)| self.client.get_list::<Value>(endpoint)),
        )
        .await?;

        Ok(fields
            .into_iter()
            .zip(lists)
            .map(|((name, _, label), items)| {
                let options = items
                    .iter()
                    .filter_map(|item| {
                        let id = item.get("id").filter(|id| !id.is_null())?;
                        let id = id.as_str().map(str::to_string).unwrap_or_else(|| id.to_string());
                        Some((id, label(item)))
                    })
                    .collect();
                (name, options)
            })
            .collect())
    }

    pub fn stats(&self, records: &[T], today: NaiveDate) -> Vec<Stat> {
        (self.config.stats)(records, today)
    }
}
