//! Station departure board server.
//!
//! Shows, for one station, the next outbound train on each route that
//! serves it, built from the MBTA v3 predictions feed.

pub mod board;
pub mod config;
pub mod domain;
pub mod mbta;
pub mod web;
