//! MBTA v3 API response DTOs.
//!
//! The API speaks JSON:API: a primary `data` list, an optional `included`
//! list of related resources, and `relationships` that point from one to
//! the other by `(type, id)`. Fields are `Option` wherever the API sends
//! `null` in practice (added trips have no schedule, terminal stops have
//! no departure time, platforms are often unannounced).

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::warn;

use crate::domain::RouteId;

/// Response from `GET /routes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesDocument {
    pub data: Vec<RouteResource>,
}

impl RoutesDocument {
    /// Route ids usable in a prediction query, in response order.
    ///
    /// An id that is not a valid [`RouteId`] is logged and skipped, so one
    /// bad route does not hide the others.
    pub fn route_ids(&self) -> Vec<RouteId> {
        self.data
            .iter()
            .filter_map(|r| match RouteId::parse(&r.id) {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(route = %r.id, error = %e, "Skipping unusable route id");
                    None
                }
            })
            .collect()
    }
}

/// A route with only its id requested (`fields[route]=id`).
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    pub id: String,
}

/// Response from `GET /predictions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionsDocument {
    /// Predictions for the requested stop and route.
    pub data: Vec<PredictionResource>,

    /// Stops, schedules and trips referenced by `data`.
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

/// A single real-time prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResource {
    pub id: String,
    pub attributes: PredictionAttributes,
    #[serde(default)]
    pub relationships: PredictionRelationships,
}

impl PredictionResource {
    /// Id of the linked schedule, if any.
    pub fn schedule_id(&self) -> Option<&str> {
        self.relationships.schedule.id()
    }

    /// Id of the linked trip, if any.
    pub fn trip_id(&self) -> Option<&str> {
        self.relationships.trip.id()
    }

    /// Id of the linked stop (platform), if any.
    pub fn stop_id(&self) -> Option<&str> {
        self.relationships.stop.id()
    }
}

/// Attributes requested via `fields[prediction]`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionAttributes {
    /// Predicted departure (RFC 3339), absent at a trip's last stop.
    pub departure_time: Option<String>,

    /// 0 or 1; the board only shows direction 0 (outbound).
    pub direction_id: u8,

    /// Free-text status, e.g. "On time", "Boarding", "Departed".
    pub status: Option<String>,
}

/// Relationships carried by a prediction when `include=stop,schedule,trip`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRelationships {
    #[serde(default)]
    pub schedule: Relationship,
    #[serde(default)]
    pub trip: Relationship,
    #[serde(default)]
    pub stop: Relationship,
}

/// A to-one JSON:API relationship.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    pub data: Option<ResourceRef>,
}

impl Relationship {
    /// Id of the related resource, if the relationship is populated.
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|r| r.id.as_str())
    }
}

/// Resource identifier object: `{"type": "...", "id": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// An entry of the `included` list, discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IncludedResource {
    Stop {
        id: String,
        attributes: StopAttributes,
    },
    Schedule {
        id: String,
        attributes: ScheduleAttributes,
    },
    Trip {
        id: String,
        attributes: TripAttributes,
    },
    /// Any other resource type; ignored.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopAttributes {
    /// Track number at a commuter rail terminal, e.g. "5".
    #[serde(default)]
    pub platform_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleAttributes {
    #[serde(default)]
    pub departure_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripAttributes {
    /// Destination label, e.g. "Lowell".
    pub headsign: String,

    /// Public train number, e.g. "313".
    pub name: String,
}

/// One decoded prediction response, tagged with the route it was queried for.
#[derive(Debug, Clone)]
pub struct RawFetchResult {
    /// Route the query was filtered to.
    pub route: RouteId,

    /// Decoded body.
    pub document: PredictionsDocument,

    /// `Last-Modified` response header, when present and parseable.
    pub last_modified: Option<DateTime<FixedOffset>>,
}
