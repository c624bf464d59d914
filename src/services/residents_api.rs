//! Client for the `/api/residents` backend endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::ApiConfig;
use crate::domain::{Resident, ResidentId, ResidentsEnvelope};
use crate::services::ApiError;

#[cfg(test)]
use mockall::automock;

/// Collection path, relative to the configured base URL.
const RESIDENTS_PATH: &str = "api/residents";

/// Operations the resident list needs from the backend.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResidentsApi: Send + Sync {
    /// Fetch the full resident collection, in backend order.
    async fn list_residents(&self) -> Result<Vec<Resident>, ApiError>;

    /// Delete a single resident.
    async fn delete_resident(&self, id: ResidentId) -> Result<(), ApiError>;
}

/// [`ResidentsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpResidentsApi {
    client: Client,
    base: Url,
}

impl HttpResidentsApi {
    /// Creates a client rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, base })
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.timeout())
    }

    /// URL of the collection endpoint.
    pub fn collection_url(&self) -> Result<Url, ApiError> {
        Ok(self.base.join(RESIDENTS_PATH)?)
    }

    /// URL of the single-resident endpoint for `id`.
    pub fn resident_url(&self, id: ResidentId) -> Result<Url, ApiError> {
        Ok(self.base.join(&format!("{RESIDENTS_PATH}/{id}"))?)
    }
}

#[async_trait]
impl ResidentsApi for HttpResidentsApi {
    async fn list_residents(&self) -> Result<Vec<Resident>, ApiError> {
        let url = self.collection_url()?;
        tracing::debug!(event = "api.residents.list_started", url = %url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                method: "GET",
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method: "GET",
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            method: "GET",
            url: url.to_string(),
            source,
        })?;
        let envelope: ResidentsEnvelope =
            serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!(
            event = "api.residents.list_completed",
            count = envelope.residents.len()
        );
        Ok(envelope.residents)
    }

    async fn delete_resident(&self, id: ResidentId) -> Result<(), ApiError> {
        let url = self.resident_url(id)?;
        tracing::debug!(event = "api.residents.delete_started", url = %url);

        let response = self
            .client
            .delete(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                method: "DELETE",
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method: "DELETE",
                url: url.to_string(),
                status,
            });
        }

        tracing::debug!(event = "api.residents.delete_completed", id = %id);
        Ok(())
    }
}
