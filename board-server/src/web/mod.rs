//! Web layer for the departure board.
//!
//! Every page load or API call triggers one refresh of the pipeline.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppState, TransitSource};
pub use templates::*;
