//! Board pipeline error types.
//!
//! These cover inconsistent upstream data for a single prediction or route.
//! Refresh-wide failures (discovery, fetch batch) are `MbtaError`s and are
//! absorbed by the orchestrator instead.

use crate::domain::TimestampError;

use super::index::ResourceKind;

/// Per-prediction errors raised while selecting or transforming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A relationship points at a resource missing from `included`
    #[error("{kind} {id:?} not found in included resources")]
    MissingResource { kind: ResourceKind, id: String },

    /// The prediction carries no relationship of the required kind
    #[error("prediction {prediction} has no {kind} relationship")]
    MissingRelationship {
        prediction: String,
        kind: ResourceKind,
    },

    /// Neither the prediction nor its schedule has a departure time
    #[error("prediction {prediction} has no departure time")]
    MissingDepartureTime { prediction: String },

    /// No schedule has been seen yet, so elapsed time cannot be computed
    #[error("no reference time established for this refresh")]
    NoReferenceTime,

    /// A timestamp failed to parse
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}
