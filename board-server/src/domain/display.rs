//! Display-ready departure rows.

use serde::Serialize;

/// Track label shown when the platform has not been announced yet.
pub const TRACK_TBD: &str = "tbd";

/// One row of the departure board.
///
/// This is the only shape that crosses into the rendering layer; every
/// field is already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPrediction {
    /// Trip headsign, e.g. "Lowell".
    pub destination: String,
    /// Public train number, e.g. "313".
    pub train_number: String,
    /// Departure time on a 12-hour clock, e.g. "9:05 AM".
    pub departure_time: String,
    /// Platform code, or [`TRACK_TBD`].
    pub track: String,
    /// Upstream status text passed through unchanged, e.g. "Boarding".
    pub status: String,
}

/// Resolve the track label from an optional platform code.
///
/// ```
/// use board_server::domain::track_label;
///
/// assert_eq!(track_label(Some("5")), "5");
/// assert_eq!(track_label(Some("")), "tbd");
/// assert_eq!(track_label(None), "tbd");
/// ```
pub fn track_label(platform_code: Option<&str>) -> String {
    match platform_code {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => TRACK_TBD.to_string(),
    }
}
