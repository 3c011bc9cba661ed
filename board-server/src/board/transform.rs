//! Turning a chosen prediction into a board row.

use crate::domain::{DisplayPrediction, format_clock, parse_timestamp, track_label};
use crate::mbta::PredictionResource;

use super::error::BoardError;
use super::index::{ResourceIndex, ResourceKind};
use super::select::scheduled_departure;

/// Resolve a prediction's relationships and format it for display.
///
/// The departure time is the prediction's own, falling back to the linked
/// schedule's. A missing trip is an error: destination and train number
/// have no sensible placeholder. A missing stop or platform code is
/// normal before the track is announced and shows as "tbd".
pub fn to_display(
    prediction: &PredictionResource,
    index: &ResourceIndex,
) -> Result<DisplayPrediction, BoardError> {
    let departure = match prediction.attributes.departure_time.as_deref() {
        Some(time) => parse_timestamp(time)?,
        None => scheduled_departure(prediction, index)?,
    };

    let trip_id = prediction
        .trip_id()
        .ok_or_else(|| BoardError::MissingRelationship {
            prediction: prediction.id.clone(),
            kind: ResourceKind::Trip,
        })?;
    let trip = index
        .trip(trip_id)
        .ok_or_else(|| BoardError::MissingResource {
            kind: ResourceKind::Trip,
            id: trip_id.to_string(),
        })?;

    let platform_code = prediction
        .stop_id()
        .and_then(|id| index.stop(id))
        .and_then(|stop| stop.platform_code.as_deref());

    Ok(DisplayPrediction {
        destination: trip.headsign.clone(),
        train_number: trip.train_number.clone(),
        departure_time: format_clock(&departure),
        track: track_label(platform_code),
        status: prediction.attributes.status.clone().unwrap_or_default(),
    })
}
