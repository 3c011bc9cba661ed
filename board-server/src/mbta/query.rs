//! Query parameters for the routes and predictions endpoints.

use crate::domain::{RouteId, StopId};

/// Attributes requested for each prediction.
pub const PREDICTION_FIELDS: &str = "departure_time,direction_id,status";

/// Related resources requested alongside each prediction.
pub const PREDICTION_INCLUDE: &str = "stop,schedule,trip";

/// Route type for commuter rail in the GTFS `route_type` enumeration.
pub const COMMUTER_RAIL: u8 = 2;

/// Route discovery query: routes of one type serving one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub stop: StopId,
    pub route_type: u8,
}

impl RouteQuery {
    pub fn new(stop: StopId, route_type: u8) -> Self {
        Self { stop, route_type }
    }

    /// Query-string pairs for `GET /routes`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filter[type]", self.route_type.to_string()),
            ("filter[stop]", self.stop.as_str().to_string()),
            ("fields[route]", "id".to_string()),
        ]
    }
}

/// Prediction query for one route at the board's stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionQuery {
    pub stop: StopId,
    pub route: RouteId,
}

impl PredictionQuery {
    pub fn new(stop: StopId, route: RouteId) -> Self {
        Self { stop, route }
    }

    /// Query-string pairs for `GET /predictions`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filter[stop]", self.stop.as_str().to_string()),
            ("filter[route]", self.route.as_str().to_string()),
            ("fields[prediction]", PREDICTION_FIELDS.to_string()),
            ("include", PREDICTION_INCLUDE.to_string()),
        ]
    }
}
