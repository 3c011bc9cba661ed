//! MBTA v3 API client.
//!
//! This module provides an HTTP client for the MBTA's public JSON:API
//! service, which provides real-time predictions for commuter rail.
//!
//! Key characteristics of the API:
//! - Responses follow JSON:API: related records arrive in a separate
//!   `included` list and are referenced by `(type, id)`
//! - Timestamps are RFC 3339 with the agency's UTC offset
//! - Unauthenticated clients are rate limited after a handful of requests

mod client;
mod error;
mod mock;
mod query;
mod types;

pub use client::{MbtaClient, MbtaConfig};
pub use error::MbtaError;
pub use mock::MockMbtaClient;
pub use query::{COMMUTER_RAIL, PREDICTION_FIELDS, PREDICTION_INCLUDE, PredictionQuery, RouteQuery};
pub use types::{
    IncludedResource, PredictionAttributes, PredictionRelationships, PredictionResource,
    PredictionsDocument, RawFetchResult, Relationship, ResourceRef, RouteResource,
    RoutesDocument, ScheduleAttributes, StopAttributes, TripAttributes,
};
