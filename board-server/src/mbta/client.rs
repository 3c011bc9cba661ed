//! MBTA v3 API HTTP client.
//!
//! Provides async methods for route discovery and per-route prediction
//! queries. One `reqwest::Client` is shared by all requests so concurrent
//! queries reuse pooled connections.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, LAST_MODIFIED};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::board::PredictionSource;
use crate::domain::RouteId;

use super::error::MbtaError;
use super::query::{PredictionQuery, RouteQuery};
use super::types::{PredictionsDocument, RawFetchResult, RoutesDocument};

/// Default base URL for the MBTA v3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// JSON:API media type.
const JSON_API: &str = "application/vnd.api+json";

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// MBTA v3 API client.
///
/// Uses a semaphore to cap in-flight requests; the unauthenticated API
/// rate-limits aggressively.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl MbtaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// List the routes serving a stop.
    pub async fn get_routes(&self, query: &RouteQuery) -> Result<Vec<RouteId>, MbtaError> {
        let response = self.send("routes", &query.params()).await?;
        let doc: RoutesDocument = decode(&response.body)?;

        Ok(doc.route_ids())
    }

    /// Fetch predictions for one route at one stop.
    ///
    /// The `Last-Modified` header is attached to the result; it is not used
    /// for conditional requests.
    pub async fn get_predictions(
        &self,
        query: &PredictionQuery,
    ) -> Result<RawFetchResult, MbtaError> {
        let response = self.send("predictions", &query.params()).await?;
        let document: PredictionsDocument = decode(&response.body)?;

        debug!(
            route = %query.route,
            predictions = document.data.len(),
            included = document.included.len(),
            "Fetched predictions"
        );

        Ok(RawFetchResult {
            route: query.route.clone(),
            document,
            last_modified: response.last_modified,
        })
    }

    /// Issue a GET and map non-success statuses to errors.
    async fn send(
        &self,
        resource: &str,
        params: &[(&'static str, String)],
    ) -> Result<RawResponse, MbtaError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MbtaError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, resource);

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let last_modified = parse_last_modified(response.headers());
        let body = response.text().await?;

        Ok(RawResponse {
            body,
            last_modified,
        })
    }
}

impl PredictionSource for MbtaClient {
    async fn routes(&self, query: &RouteQuery) -> Result<Vec<RouteId>, MbtaError> {
        self.get_routes(query).await
    }

    async fn predictions(&self, query: &PredictionQuery) -> Result<RawFetchResult, MbtaError> {
        self.get_predictions(query).await
    }
}

/// Successful response body plus the headers we care about.
struct RawResponse {
    body: String,
    last_modified: Option<DateTime<FixedOffset>>,
}

/// Parse the `Last-Modified` header (an RFC 2822-style HTTP date).
fn parse_last_modified(headers: &HeaderMap) -> Option<DateTime<FixedOffset>> {
    let value = headers.get(LAST_MODIFIED)?.to_str().ok()?;
    match DateTime::parse_from_rfc2822(value) {
        Ok(t) => Some(t),
        Err(e) => {
            debug!(value, error = %e, "Ignoring unparseable Last-Modified header");
            None
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, MbtaError> {
    serde_json::from_str(body).map_err(|e| MbtaError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}
