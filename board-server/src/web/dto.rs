//! Data transfer objects for web responses.

use serde::Serialize;

use crate::board::Board;
use crate::domain::{DisplayPrediction, TimeContext};

/// Response for `GET /api/departures`.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    /// One row per route, in route order
    pub departures: Vec<DisplayPrediction>,

    /// Header time from the feed; `null` when there is no data
    pub current_time: Option<TimeContext>,

    /// Newest upstream `Last-Modified`, RFC 3339
    pub last_modified: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl From<Board> for DeparturesResponse {
    fn from(board: Board) -> Self {
        Self {
            departures: board.departures,
            current_time: board.current_time,
            last_modified: board.last_modified.map(|t| t.to_rfc3339()),
        }
    }
}
