//! Choosing the one prediction a route shows on the board.
//!
//! Only direction 0 is eligible. Scanning in feed order:
//!
//! - a `Departed` prediction whose scheduled departure is under five
//!   minutes old replaces whatever was chosen so far;
//! - a `Departed` prediction older than that is ignored;
//! - any other prediction is taken only if nothing is chosen yet.
//!
//! So the last recent departure wins, and otherwise the first upcoming
//! train wins. The asymmetry matches what riders have been shown in the
//! past and is kept as-is.

use chrono::{DateTime, FixedOffset};
use tracing::{trace, warn};

use crate::mbta::PredictionResource;

use super::error::BoardError;
use super::index::{ResourceIndex, ResourceKind};

/// The only direction shown on the board (outbound from the terminal).
pub const DISPLAYED_DIRECTION: u8 = 0;

/// Status text marking a train that has left.
pub const DEPARTED: &str = "Departed";

/// How long a departed train stays on the board, in seconds.
pub const RECENT_DEPARTURE_SECS: i64 = 300;

/// Pick at most one prediction for a route.
///
/// Departed candidates whose elapsed time cannot be computed (missing
/// schedule, malformed timestamp, no reference time) are logged and
/// skipped; they never abort the scan. A departure scheduled after the
/// reference time has a negative elapsed time and counts as recent.
pub fn select_prediction<'a>(
    predictions: &'a [PredictionResource],
    index: &ResourceIndex,
) -> Option<&'a PredictionResource> {
    let mut chosen = None;

    for candidate in predictions
        .iter()
        .filter(|p| p.attributes.direction_id == DISPLAYED_DIRECTION)
    {
        if !is_departed(candidate) {
            chosen = chosen.or(Some(candidate));
            continue;
        }

        match departed_elapsed_secs(candidate, index) {
            Ok(elapsed) if elapsed < RECENT_DEPARTURE_SECS => chosen = Some(candidate),
            Ok(elapsed) => {
                trace!(prediction = %candidate.id, elapsed, "Ignoring stale departure");
            }
            Err(e) => {
                warn!(prediction = %candidate.id, error = %e, "Skipping departed prediction");
            }
        }
    }

    chosen
}

/// Whether the prediction reports the train as departed.
pub fn is_departed(prediction: &PredictionResource) -> bool {
    prediction.attributes.status.as_deref() == Some(DEPARTED)
}

/// Seconds between the scheduled departure and the reference time.
///
/// Negative when the reference time is before the scheduled departure.
fn departed_elapsed_secs(
    prediction: &PredictionResource,
    index: &ResourceIndex,
) -> Result<i64, BoardError> {
    let now = index.now().ok_or(BoardError::NoReferenceTime)?;
    let departed = scheduled_departure(prediction, index)?;
    Ok(now.signed_duration_since(departed).num_seconds())
}

/// The linked schedule's departure time.
pub(super) fn scheduled_departure(
    prediction: &PredictionResource,
    index: &ResourceIndex,
) -> Result<DateTime<FixedOffset>, BoardError> {
    let schedule_id = prediction
        .schedule_id()
        .ok_or_else(|| BoardError::MissingRelationship {
            prediction: prediction.id.clone(),
            kind: ResourceKind::Schedule,
        })?;

    let schedule = index
        .schedule(schedule_id)
        .ok_or_else(|| BoardError::MissingResource {
            kind: ResourceKind::Schedule,
            id: schedule_id.to_string(),
        })?;

    schedule
        .departure_time()?
        .ok_or_else(|| BoardError::MissingDepartureTime {
            prediction: prediction.id.clone(),
        })
}
