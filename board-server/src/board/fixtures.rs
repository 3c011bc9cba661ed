//! Builders for prediction documents used by the board tests.

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::{RouteId, parse_timestamp};
use crate::mbta::{
    IncludedResource, PredictionAttributes, PredictionRelationships, PredictionResource,
    PredictionsDocument, RawFetchResult, Relationship, ResourceRef, ScheduleAttributes,
    StopAttributes, TripAttributes,
};

pub fn ts(s: &str) -> DateTime<FixedOffset> {
    parse_timestamp(s).unwrap()
}

pub fn utc(s: &str) -> DateTime<Utc> {
    ts(s).with_timezone(&Utc)
}

pub fn route(s: &str) -> RouteId {
    RouteId::parse(s).unwrap()
}

fn rel(kind: &str, id: Option<&str>) -> Relationship {
    Relationship {
        data: id.map(|id| ResourceRef {
            kind: kind.to_string(),
            id: id.to_string(),
        }),
    }
}

/// Builder for a prediction. Defaults: direction 0, status "On time",
/// no departure time, linked to `sched-{id}`, `trip-{id}` and `stop-{id}`.
pub struct PredictionBuilder {
    id: String,
    direction_id: u8,
    status: Option<String>,
    departure_time: Option<String>,
    schedule: Option<String>,
    trip: Option<String>,
    stop: Option<String>,
}

pub fn prediction(id: &str) -> PredictionBuilder {
    PredictionBuilder {
        id: id.to_string(),
        direction_id: 0,
        status: Some("On time".to_string()),
        departure_time: None,
        schedule: Some(format!("sched-{id}")),
        trip: Some(format!("trip-{id}")),
        stop: Some(format!("stop-{id}")),
    }
}

impl PredictionBuilder {
    pub fn direction(mut self, direction_id: u8) -> Self {
        self.direction_id = direction_id;
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn no_status(mut self) -> Self {
        self.status = None;
        self
    }

    pub fn departed(self) -> Self {
        self.status("Departed")
    }

    pub fn departs(mut self, time: &str) -> Self {
        self.departure_time = Some(time.to_string());
        self
    }

    pub fn schedule(mut self, id: Option<&str>) -> Self {
        self.schedule = id.map(str::to_string);
        self
    }

    pub fn trip(mut self, id: Option<&str>) -> Self {
        self.trip = id.map(str::to_string);
        self
    }

    pub fn stop(mut self, id: Option<&str>) -> Self {
        self.stop = id.map(str::to_string);
        self
    }

    pub fn build(self) -> PredictionResource {
        PredictionResource {
            attributes: PredictionAttributes {
                departure_time: self.departure_time,
                direction_id: self.direction_id,
                status: self.status,
            },
            relationships: PredictionRelationships {
                schedule: rel("schedule", self.schedule.as_deref()),
                trip: rel("trip", self.trip.as_deref()),
                stop: rel("stop", self.stop.as_deref()),
            },
            id: self.id,
        }
    }
}

pub fn stop(id: &str, platform_code: Option<&str>) -> IncludedResource {
    IncludedResource::Stop {
        id: id.to_string(),
        attributes: StopAttributes {
            platform_code: platform_code.map(str::to_string),
        },
    }
}

pub fn schedule(id: &str, departure_time: Option<&str>) -> IncludedResource {
    IncludedResource::Schedule {
        id: id.to_string(),
        attributes: ScheduleAttributes {
            departure_time: departure_time.map(str::to_string),
        },
    }
}

pub fn trip(id: &str, headsign: &str, name: &str) -> IncludedResource {
    IncludedResource::Trip {
        id: id.to_string(),
        attributes: TripAttributes {
            headsign: headsign.to_string(),
            name: name.to_string(),
        },
    }
}

/// The three included records a default `prediction(id)` links to.
pub fn linked(id: &str, scheduled: &str, platform: Option<&str>) -> Vec<IncludedResource> {
    vec![
        stop(&format!("stop-{id}"), platform),
        schedule(&format!("sched-{id}"), Some(scheduled)),
        trip(&format!("trip-{id}"), "Lowell", id),
    ]
}

pub fn fetch_result(
    route_id: &str,
    data: Vec<PredictionResource>,
    included: Vec<IncludedResource>,
) -> RawFetchResult {
    RawFetchResult {
        route: route(route_id),
        document: PredictionsDocument { data, included },
        last_modified: None,
    }
}
