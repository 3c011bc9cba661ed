//! The departure board pipeline.
//!
//! Route discovery, concurrent prediction fetch, included-resource index,
//! per-route selection and formatting into display rows.

mod error;
mod fetch;
mod index;
mod pipeline;
mod select;
mod transform;

#[cfg(test)]
mod fixtures;

pub use error::BoardError;
pub use fetch::{PredictionSource, fetch_all};
pub use index::{ResourceIndex, ResourceKind, ScheduleRecord, StopRecord, TripRecord};
pub use pipeline::{Board, BoardSettings, DepartureBoard};
pub use select::{DEPARTED, DISPLAYED_DIRECTION, RECENT_DEPARTURE_SECS, is_departed, select_prediction};
pub use transform::to_display;
