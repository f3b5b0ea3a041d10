//! Instance Info Source client
//!
//! One shared, pooled reqwest client per process. Each fetch carries its own
//! request timeout on top of the client-wide one.

use crate::models::InstanceSnapshot;
use reqwest::{Client, StatusCode, Url};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
pub const POOL_MAX_IDLE_PER_HOST: usize = 2;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch instance info: {0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected status code from instance API: {0}")]
    UnexpectedStatus(StatusCode),
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid backend URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Anything that can hand out an instance snapshot
pub trait InstanceSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<InstanceSnapshot, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpInstanceSource {
    client: Client,
    url: Url,
    request_timeout: Duration,
}

impl HttpInstanceSource {
    pub fn new(url: &str, request_timeout: Duration) -> Result<Self, SourceError> {
        let url = Url::parse(url).map_err(|e| SourceError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()?;

        Ok(Self {
            client,
            url,
            request_timeout,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl InstanceSource for HttpInstanceSource {
    async fn fetch(&self) -> Result<InstanceSnapshot, FetchError> {
        let resp = self
            .client
            .get(self.url.clone())
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(FetchError::Request)?;

        if resp.status() != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(resp.status()));
        }

        resp.json::<InstanceSnapshot>().await.map_err(FetchError::Decode)
    }
}
