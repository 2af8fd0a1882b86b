//! Catalog API client
//!
//! Pulls the four catalog collections (artists, dates, locations, relation)
//! one after another and joins them into a [`Dataset`]. The first failing
//! request or body aborts the load; there is no retry and no partial result.

use async_trait::async_trait;
use groupie_common::config::ServerConfig;
use groupie_common::model::{DateRecord, IndexEnvelope, LocationRecord, RelationRecord};
use groupie_common::{Artist, Dataset};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const ARTISTS_ENDPOINT: &str = "artists";
pub const DATES_ENDPOINT: &str = "dates";
pub const LOCATIONS_ENDPOINT: &str = "locations";
pub const RELATION_ENDPOINT: &str = "relation";

const USER_AGENT: &str = concat!("groupie-tracker/", env!("CARGO_PKG_VERSION"));

/// Catalog fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Something that can produce the full catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Dataset, FetchError>;
}

/// HTTP client for the catalog API
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// `base_url` without trailing slash, e.g. `https://groupietrackers.herokuapp.com/api`
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, FetchError> {
        Self::new(
            config.api_base_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/{endpoint}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(url = %url, "Fetching catalog collection");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn load(&self) -> Result<Dataset, FetchError> {
        info!(base_url = %self.base_url, "Fetching catalog");

        let artists: Vec<Artist> = self.get_json(ARTISTS_ENDPOINT).await?;
        let dates: IndexEnvelope<DateRecord> = self.get_json(DATES_ENDPOINT).await?;
        let locations: IndexEnvelope<LocationRecord> = self.get_json(LOCATIONS_ENDPOINT).await?;
        let relations: IndexEnvelope<RelationRecord> = self.get_json(RELATION_ENDPOINT).await?;

        let dataset = Dataset::from_parts(artists, dates.index, locations.index, relations.index);

        info!(
            artists = dataset.artists.len(),
            dates = dataset.dates.len(),
            locations = dataset.locations.len(),
            relations = dataset.relations.len(),
            "Catalog fetched"
        );

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = CatalogClient::new("http://localhost:1234/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/api");
    }

    #[test]
    fn test_from_config_uses_api_url() {
        let config = ServerConfig {
            api_base_url: "http://catalog.test/api".to_string(),
            request_timeout_secs: Some(3),
            ..Default::default()
        };
        let client = CatalogClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://catalog.test/api");
    }
}
