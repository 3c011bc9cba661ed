//! Domain types for the departure board.
//!
//! Identifiers are validated at construction time; display types carry
//! only pre-formatted strings so the rendering layer needs no logic.

mod display;
mod ids;
mod time;

pub use display::{DisplayPrediction, TRACK_TBD, track_label};
pub use ids::{InvalidId, RouteId, StopId};
pub use time::{TimeContext, TimestampError, format_clock, parse_timestamp};
