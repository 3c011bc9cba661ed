//! Mock MBTA client for running the board without API access.
//!
//! Loads a route list and per-route prediction documents from JSON files
//! and serves them as if they were live API responses.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use crate::board::PredictionSource;
use crate::domain::RouteId;

use super::error::MbtaError;
use super::query::{PredictionQuery, RouteQuery};
use super::types::{PredictionsDocument, RawFetchResult, RoutesDocument};

/// Mock client that serves data from memory.
///
/// Expects a data directory laid out as:
///
/// ```text
/// routes.json                  # a GET /routes response
/// predictions/{route_id}.json  # a GET /predictions response per route
/// ```
///
/// Routes without a predictions file answer with an empty document, as the
/// live API does for a line with nothing scheduled.
#[derive(Debug, Clone, Default)]
pub struct MockMbtaClient {
    routes: Arc<Vec<RouteId>>,
    predictions: Arc<HashMap<RouteId, PredictionsDocument>>,
    failing_routes: Arc<HashSet<RouteId>>,
    discovery_fails: bool,
}

impl MockMbtaClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MbtaError> {
        let data_dir = data_dir.as_ref();

        let routes_path = data_dir.join("routes.json");
        let json = std::fs::read_to_string(&routes_path).map_err(|e| MbtaError::ApiError {
            status: 0,
            message: format!("Failed to read {:?}: {}", routes_path, e),
        })?;
        let doc: RoutesDocument = serde_json::from_str(&json).map_err(|e| MbtaError::Json {
            message: format!("Failed to parse {:?}: {}", routes_path, e),
            body: None,
        })?;

        let routes = doc.route_ids();

        let mut predictions = HashMap::new();
        for route in &routes {
            let path = data_dir
                .join("predictions")
                .join(format!("{}.json", route.as_str()));
            if !path.is_file() {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(|e| MbtaError::ApiError {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;
            let doc: PredictionsDocument =
                serde_json::from_str(&json).map_err(|e| MbtaError::Json {
                    message: format!("Failed to parse {:?}: {}", path, e),
                    body: None,
                })?;

            predictions.insert(route.clone(), doc);
        }

        Ok(Self::from_documents(routes, predictions))
    }

    /// Create a mock client from in-memory documents.
    pub fn from_documents(
        routes: Vec<RouteId>,
        predictions: HashMap<RouteId, PredictionsDocument>,
    ) -> Self {
        Self {
            routes: Arc::new(routes),
            predictions: Arc::new(predictions),
            failing_routes: Arc::default(),
            discovery_fails: false,
        }
    }

    /// Make prediction queries for `route` fail with a 503.
    pub fn with_failing_route(mut self, route: RouteId) -> Self {
        let mut failing = (*self.failing_routes).clone();
        failing.insert(route);
        self.failing_routes = Arc::new(failing);
        self
    }

    /// Make route discovery fail with a 503.
    pub fn with_discovery_failure(mut self) -> Self {
        self.discovery_fails = true;
        self
    }

    /// Routes the mock will report.
    pub fn available_routes(&self) -> &[RouteId] {
        &self.routes
    }

    /// Mimics `MbtaClient::get_routes`. The query filters are ignored.
    pub async fn get_routes(&self, _query: &RouteQuery) -> Result<Vec<RouteId>, MbtaError> {
        if self.discovery_fails {
            return Err(unavailable());
        }
        Ok(self.routes.to_vec())
    }

    /// Mimics `MbtaClient::get_predictions`.
    pub async fn get_predictions(
        &self,
        query: &PredictionQuery,
    ) -> Result<RawFetchResult, MbtaError> {
        if self.failing_routes.contains(&query.route) {
            return Err(unavailable());
        }

        let document = self
            .predictions
            .get(&query.route)
            .cloned()
            .unwrap_or_default();

        Ok(RawFetchResult {
            route: query.route.clone(),
            document,
            last_modified: None,
        })
    }
}

impl PredictionSource for MockMbtaClient {
    async fn routes(&self, query: &RouteQuery) -> Result<Vec<RouteId>, MbtaError> {
        self.get_routes(query).await
    }

    async fn predictions(&self, query: &PredictionQuery) -> Result<RawFetchResult, MbtaError> {
        self.get_predictions(query).await
    }
}

fn unavailable() -> MbtaError {
    MbtaError::ApiError {
        status: 503,
        message: "Service Unavailable (mock)".to_string(),
    }
}
