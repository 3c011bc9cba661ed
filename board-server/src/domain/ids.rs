//! Route and stop identifier types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid route or stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

/// Check the shared rules for upstream identifiers.
///
/// Identifiers are opaque, but they end up inside `filter[...]` query
/// parameters where a comma means "one of several values", so commas and
/// whitespace are rejected along with the empty string.
fn validate(s: &str, kind: &'static str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId {
            kind,
            reason: "cannot be empty",
        });
    }
    if s.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err(InvalidId {
            kind,
            reason: "cannot contain whitespace or commas",
        });
    }
    Ok(())
}

/// A transit route identifier, e.g. `CR-Fitchburg`.
///
/// # Examples
///
/// ```
/// use board_server::domain::RouteId;
///
/// let route = RouteId::parse("CR-Fitchburg").unwrap();
/// assert_eq!(route.as_str(), "CR-Fitchburg");
///
/// assert!(RouteId::parse("").is_err());
/// assert!(RouteId::parse("CR-Lowell,CR-Haverhill").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate(s, "route")?;
        Ok(RouteId(s.to_string()))
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stop (station) identifier, e.g. `place-north`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate(s, "stop")?;
        Ok(StopId(s.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
