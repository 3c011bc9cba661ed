//! Concurrent prediction fetching.

use std::future::Future;

use futures::future::try_join_all;

use crate::domain::RouteId;
use crate::mbta::{MbtaError, PredictionQuery, RawFetchResult, RouteQuery};

/// Source of route and prediction data.
///
/// Implemented by the live `MbtaClient` and by `MockMbtaClient`.
pub trait PredictionSource {
    /// Routes serving the queried stop.
    fn routes(
        &self,
        query: &RouteQuery,
    ) -> impl Future<Output = Result<Vec<RouteId>, MbtaError>> + Send;

    /// Predictions for one route at the queried stop.
    fn predictions(
        &self,
        query: &PredictionQuery,
    ) -> impl Future<Output = Result<RawFetchResult, MbtaError>> + Send;
}

/// Fetch predictions for every query concurrently.
///
/// Results come back in query order. The batch is all-or-nothing: the
/// first failure is returned and the requests still in flight are
/// dropped, which cancels them. Dropping the returned future (e.g. when
/// the client disconnects) cancels every request the same way.
pub async fn fetch_all<S: PredictionSource>(
    source: &S,
    queries: &[PredictionQuery],
) -> Result<Vec<RawFetchResult>, MbtaError> {
    try_join_all(queries.iter().map(|query| source.predictions(query))).await
}
