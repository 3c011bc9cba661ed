//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::board::BoardSettings;
use crate::domain::StopId;
use crate::mbta::{COMMUTER_RAIL, MbtaConfig};

/// Default stop: Boston North Station.
const DEFAULT_STOP: &str = "place-north";

const DEFAULT_TITLE: &str = "North Station MBTA Departure Board";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Upstream API client settings (`MBTA_BASE_URL`, `MBTA_TIMEOUT_SECS`,
    /// `MBTA_MAX_CONCURRENT`).
    pub mbta: MbtaConfig,

    /// Stop and route type (`MBTA_STOP`, `MBTA_ROUTE_TYPE`).
    pub board: BoardSettings,

    /// Page title (`BOARD_TITLE`).
    pub title: String,

    /// Listen address (`BOARD_ADDR`).
    pub addr: SocketAddr,

    /// Serve fixtures from this directory instead of the live API
    /// (`BOARD_MOCK_DIR`).
    pub mock_dir: Option<PathBuf>,

    /// Static assets directory (`BOARD_STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl BoardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Unset or empty variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut mbta = MbtaConfig::new();
        if let Some(url) = get("MBTA_BASE_URL") {
            mbta = mbta.with_base_url(url);
        }
        if let Some(secs) = parse_var("MBTA_TIMEOUT_SECS", get("MBTA_TIMEOUT_SECS"))? {
            mbta = mbta.with_timeout(secs);
        }
        if let Some(n) = parse_var("MBTA_MAX_CONCURRENT", get("MBTA_MAX_CONCURRENT"))? {
            mbta = mbta.with_max_concurrent(n);
        }

        let stop_str = get("MBTA_STOP").unwrap_or_else(|| DEFAULT_STOP.to_string());
        let stop = StopId::parse(&stop_str).map_err(|e| ConfigError::Invalid {
            var: "MBTA_STOP",
            value: stop_str.clone(),
            reason: e.to_string(),
        })?;
        let route_type =
            parse_var("MBTA_ROUTE_TYPE", get("MBTA_ROUTE_TYPE"))?.unwrap_or(COMMUTER_RAIL);

        let addr_str = get("BOARD_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_str.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                var: "BOARD_ADDR",
                value: addr_str.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            mbta,
            board: BoardSettings::new(stop).with_route_type(route_type),
            title: get("BOARD_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            addr,
            mock_dir: get("BOARD_MOCK_DIR").map(PathBuf::from),
            static_dir: get("BOARD_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }
}

/// Parse an optional variable, reporting which variable was bad.
fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
