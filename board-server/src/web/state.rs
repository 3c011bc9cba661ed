//! Application state for the web layer.

use std::sync::Arc;

use crate::board::{DepartureBoard, PredictionSource};
use crate::domain::RouteId;
use crate::mbta::{
    MbtaClient, MbtaError, MockMbtaClient, PredictionQuery, RawFetchResult, RouteQuery,
};

/// Where the board gets its data.
#[derive(Debug, Clone)]
pub enum TransitSource {
    /// The live MBTA API.
    Live(MbtaClient),
    /// JSON fixtures on disk.
    Mock(MockMbtaClient),
}

impl PredictionSource for TransitSource {
    async fn routes(&self, query: &RouteQuery) -> Result<Vec<RouteId>, MbtaError> {
        match self {
            TransitSource::Live(client) => client.get_routes(query).await,
            TransitSource::Mock(client) => client.get_routes(query).await,
        }
    }

    async fn predictions(&self, query: &PredictionQuery) -> Result<RawFetchResult, MbtaError> {
        match self {
            TransitSource::Live(client) => client.get_predictions(query).await,
            TransitSource::Mock(client) => client.get_predictions(query).await,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The refresh pipeline
    pub board: Arc<DepartureBoard<TransitSource>>,

    /// Page title
    pub title: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(board: DepartureBoard<TransitSource>, title: impl Into<Arc<str>>) -> Self {
        Self {
            board: Arc::new(board),
            title: title.into(),
        }
    }
}
