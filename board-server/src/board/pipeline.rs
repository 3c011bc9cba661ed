//! Refresh orchestration.
//!
//! A refresh discovers the stop's routes, fetches every route's
//! predictions concurrently, indexes the included resources, then picks
//! and formats one prediction per route. Refreshes share nothing: each
//! builds its own index and reference time.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{DisplayPrediction, StopId, TimeContext};
use crate::mbta::{COMMUTER_RAIL, PredictionQuery, RawFetchResult, RouteQuery};

use super::fetch::{PredictionSource, fetch_all};
use super::index::ResourceIndex;
use super::select::select_prediction;
use super::transform::to_display;

/// Which stop the board shows, and which routes count.
#[derive(Debug, Clone)]
pub struct BoardSettings {
    pub stop: StopId,
    /// GTFS route type used for discovery (2 = commuter rail).
    pub route_type: u8,
}

impl BoardSettings {
    /// Commuter rail departures from `stop`.
    pub fn new(stop: StopId) -> Self {
        Self {
            stop,
            route_type: COMMUTER_RAIL,
        }
    }

    pub fn with_route_type(mut self, route_type: u8) -> Self {
        self.route_type = route_type;
        self
    }
}

/// Result of one refresh.
///
/// The "no data" state (discovery or fetch failed, or nothing to show) has
/// no departures and no `current_time`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    /// One row per route with a selection, in route order.
    pub departures: Vec<DisplayPrediction>,

    /// Header time, taken from the feed.
    pub current_time: Option<TimeContext>,

    /// Newest `Last-Modified` across the fetched responses.
    pub last_modified: Option<DateTime<Utc>>,
}

impl Board {
    /// The "no data yet" board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the "no data" state.
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty() && self.current_time.is_none()
    }

    /// Build the board from a completed fetch batch.
    ///
    /// `wall_clock` is the instant the header time is derived from; it is
    /// shown in the offset of the first schedule in the feed.
    pub fn assemble(results: &[RawFetchResult], wall_clock: DateTime<Utc>) -> Self {
        let index = ResourceIndex::build(results, wall_clock);

        let mut departures = Vec::new();
        for result in results {
            let Some(chosen) = select_prediction(&result.document.data, &index) else {
                debug!(route = %result.route, "No eligible prediction");
                continue;
            };

            match to_display(chosen, &index) {
                Ok(row) => departures.push(row),
                Err(e) => {
                    warn!(
                        route = %result.route,
                        prediction = %chosen.id,
                        error = %e,
                        "Skipping route with inconsistent data"
                    );
                }
            }
        }

        let last_modified = results
            .iter()
            .filter_map(|r| r.last_modified)
            .max()
            .map(|t| t.with_timezone(&Utc));

        Self {
            departures,
            current_time: index.now().map(|now| TimeContext::from_instant(&now)),
            last_modified,
        }
    }
}

/// The departure board pipeline over a prediction source.
#[derive(Debug, Clone)]
pub struct DepartureBoard<S> {
    source: S,
    settings: BoardSettings,
}

impl<S: PredictionSource> DepartureBoard<S> {
    pub fn new(source: S, settings: BoardSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Run one refresh against the current wall clock.
    pub async fn refresh(&self) -> Board {
        self.refresh_with_clock(Utc::now).await
    }

    /// Run one refresh with a fixed wall-clock instant.
    pub async fn refresh_at(&self, wall_clock: DateTime<Utc>) -> Board {
        self.refresh_with_clock(move || wall_clock).await
    }

    /// Run one refresh, reading `clock` once the fetch batch has completed.
    ///
    /// The reference time is the instant the responses are merged, not the
    /// instant the refresh started. Never fails: discovery or fetch
    /// failures are logged and produce [`Board::empty`].
    pub async fn refresh_with_clock<C>(&self, clock: C) -> Board
    where
        C: FnOnce() -> DateTime<Utc>,
    {
        let stop = &self.settings.stop;
        let route_query = RouteQuery::new(stop.clone(), self.settings.route_type);

        let routes = match self.source.routes(&route_query).await {
            Ok(routes) => routes,
            Err(e) => {
                warn!(stop = %stop, error = %e, "Route discovery failed");
                return Board::empty();
            }
        };

        if routes.is_empty() {
            info!(stop = %stop, "No routes serve this stop");
            return Board::empty();
        }

        let queries: Vec<PredictionQuery> = routes
            .into_iter()
            .map(|route| PredictionQuery::new(stop.clone(), route))
            .collect();

        let results = match fetch_all(&self.source, &queries).await {
            Ok(results) => results,
            Err(e) => {
                warn!(stop = %stop, routes = queries.len(), error = %e, "Prediction fetch failed");
                return Board::empty();
            }
        };

        let board = Board::assemble(&results, clock());
        info!(
            stop = %stop,
            routes = queries.len(),
            departures = board.departures.len(),
            "Refreshed departure board"
        );
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fixtures::*;
    use crate::domain::RouteId;
    use crate::mbta::{MbtaError, MockMbtaClient, PredictionsDocument};
    use chrono::{Duration, FixedOffset};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn settings() -> BoardSettings {
        BoardSettings::new(StopId::parse("place-north").unwrap())
    }

    /// 9:10 AM at -05:00.
    fn wall_clock() -> DateTime<Utc> {
        utc("2024-01-05T14:10:00Z")
    }

    fn document(id: &str, status: &str, scheduled: &str, platform: Option<&str>) -> PredictionsDocument {
        PredictionsDocument {
            data: vec![prediction(id).status(status).build()],
            included: linked(id, scheduled, platform),
        }
    }

    fn three_routes() -> MockMbtaClient {
        let mut docs = HashMap::new();
        docs.insert(
            route("CR-Fitchburg"),
            document("413", "On time", "2024-01-05T10:10:00-05:00", None),
        );
        docs.insert(
            route("CR-Haverhill"),
            document("211", "Boarding", "2024-01-05T09:20:00-05:00", Some("3")),
        );
        docs.insert(
            route("CR-Lowell"),
            document("313", "Departed", "2024-01-05T09:08:00-05:00", Some("5")),
        );
        MockMbtaClient::from_documents(
            vec![route("CR-Fitchburg"), route("CR-Haverhill"), route("CR-Lowell")],
            docs,
        )
    }

    #[tokio::test]
    async fn refresh_builds_rows_in_route_order() {
        let board = DepartureBoard::new(three_routes(), settings());
        let result = board.refresh_at(wall_clock()).await;

        let trains: Vec<_> = result
            .departures
            .iter()
            .map(|d| d.train_number.as_str())
            .collect();
        assert_eq!(trains, vec!["413", "211", "313"]);

        assert_eq!(result.departures[0].departure_time, "10:10 AM");
        assert_eq!(result.departures[0].track, "tbd");
        assert_eq!(result.departures[1].track, "3");
        assert_eq!(result.departures[2].status, "Departed");

        let time = result.current_time.unwrap();
        assert_eq!(time.day, "Friday");
        assert_eq!(time.date, "1-5-2024");
        assert_eq!(time.hour, "9:10 AM");
    }

    #[tokio::test]
    async fn one_failed_fetch_empties_the_board() {
        let source = three_routes().with_failing_route(route("CR-Haverhill"));
        let board = DepartureBoard::new(source, settings());

        let result = board.refresh_at(wall_clock()).await;
        assert!(result.is_empty());
        assert_eq!(result, Board::empty());
    }

    #[tokio::test]
    async fn discovery_failure_empties_the_board() {
        let source = three_routes().with_discovery_failure();
        let board = DepartureBoard::new(source, settings());

        assert!(board.refresh_at(wall_clock()).await.is_empty());
    }

    #[tokio::test]
    async fn no_routes_empties_the_board() {
        let source = MockMbtaClient::from_documents(vec![], HashMap::new());
        let board = DepartureBoard::new(source, settings());

        let result = board.refresh_at(wall_clock()).await;
        assert!(result.departures.is_empty());
        assert!(result.current_time.is_none());
    }

    #[tokio::test]
    async fn route_with_bad_data_is_skipped_alone() {
        let mut docs = HashMap::new();
        docs.insert(
            route("CR-Fitchburg"),
            PredictionsDocument {
                data: vec![prediction("413").trip(Some("trip-missing")).build()],
                included: linked("413", "2024-01-05T10:10:00-05:00", None),
            },
        );
        docs.insert(
            route("CR-Lowell"),
            document("313", "On time", "2024-01-05T09:35:00-05:00", Some("5")),
        );
        let source = MockMbtaClient::from_documents(
            vec![route("CR-Fitchburg"), route("CR-Lowell")],
            docs,
        );

        let result = DepartureBoard::new(source, settings())
            .refresh_at(wall_clock())
            .await;

        assert_eq!(result.departures.len(), 1);
        assert_eq!(result.departures[0].train_number, "313");
        assert!(result.current_time.is_some());
    }

    #[tokio::test]
    async fn stale_departure_leaves_route_off_the_board() {
        let mut docs = HashMap::new();
        docs.insert(
            route("CR-Lowell"),
            document("311", "Departed", "2024-01-05T09:01:00-05:00", Some("7")),
        );
        let source = MockMbtaClient::from_documents(vec![route("CR-Lowell")], docs);

        let result = DepartureBoard::new(source, settings())
            .refresh_at(wall_clock())
            .await;

        assert!(result.departures.is_empty());
        // The feed still had a schedule, so the header time is known
        assert!(result.current_time.is_some());
    }

    #[test]
    fn assemble_reports_newest_last_modified() {
        let mut a = fetch_result("CR-Lowell", vec![], vec![]);
        a.last_modified = Some(ts("2024-01-05T14:05:00+00:00"));
        let mut b = fetch_result("CR-Fitchburg", vec![], vec![]);
        b.last_modified = Some(ts("2024-01-05T14:06:30+00:00"));
        let c = fetch_result("CR-Haverhill", vec![], vec![]);

        let board = Board::assemble(&[a, b, c], wall_clock());
        assert_eq!(board.last_modified, Some(utc("2024-01-05T14:06:30Z")));
        assert!(board.departures.is_empty());
    }

    #[tokio::test]
    async fn mock_fixtures_refresh() {
        let source = MockMbtaClient::new("data/mock").unwrap();
        let board = DepartureBoard::new(source, settings());

        // 9:04 AM: train 311 left at 9:01, so it is still shown for Lowell
        let result = board.refresh_at(utc("2024-01-05T14:04:00Z")).await;

        let rows: Vec<_> = result
            .departures
            .iter()
            .map(|d| (d.destination.as_str(), d.train_number.as_str(), d.track.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![("Wachusett", "413", "tbd"), ("Lowell", "311", "7")]
        );
        assert_eq!(result.current_time.unwrap().hour, "9:04 AM");
    }

    /// One Lowell route whose only train departed `stale_secs` before the
    /// response is produced, answering after `delay`.
    struct SlowSource {
        delay: std::time::Duration,
        stale_secs: i64,
        fetched: Arc<AtomicBool>,
    }

    impl SlowSource {
        fn new(delay_ms: u64, stale_secs: i64) -> Self {
            Self {
                delay: std::time::Duration::from_millis(delay_ms),
                stale_secs,
                fetched: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl PredictionSource for SlowSource {
        async fn routes(&self, _query: &RouteQuery) -> Result<Vec<RouteId>, MbtaError> {
            Ok(vec![route("CR-Lowell")])
        }

        async fn predictions(&self, query: &PredictionQuery) -> Result<RawFetchResult, MbtaError> {
            tokio::time::sleep(self.delay).await;

            let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
            let departed = (Utc::now() - Duration::seconds(self.stale_secs)).with_timezone(&eastern);
            let result = fetch_result(
                query.route.as_str(),
                vec![prediction("311").departed().build()],
                linked("311", &departed.to_rfc3339(), Some("7")),
            );

            self.fetched.store(true, Ordering::SeqCst);
            Ok(result)
        }
    }

    #[tokio::test]
    async fn clock_is_read_after_the_fetch() {
        let source = SlowSource::new(10, 0);
        let fetched = Arc::clone(&source.fetched);
        let board = DepartureBoard::new(source, settings());

        let result = board
            .refresh_with_clock(|| {
                assert!(fetched.load(Ordering::SeqCst), "clock read before responses arrived");
                Utc::now()
            })
            .await;

        assert_eq!(result.departures.len(), 1);
    }

    #[tokio::test]
    async fn slow_response_ages_departure_out_of_window() {
        // Departed 301s before the response arrives. Measured from the start
        // of the refresh it would look 299s old and stay on the board.
        let board = DepartureBoard::new(SlowSource::new(2_000, 301), settings());

        let result = board.refresh().await;

        assert!(result.departures.is_empty(), "stale departure shown: {:?}", result.departures);
        assert!(result.current_time.is_some());
    }
}
