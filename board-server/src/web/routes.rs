//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;

use super::dto::*;
use super::state::AppState;
use super::templates::DeparturesTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/api/departures", get(departures))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The departure board page. Each load runs one refresh.
async fn board_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let board = state.board.refresh().await;

    let html = DeparturesTemplate::new(&*state.title, board)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;

    Ok(Html(html))
}

/// The same refresh as the page, as JSON.
async fn departures(State(state): State<AppState>) -> Json<DeparturesResponse> {
    let board = state.board.refresh().await;
    Json(DeparturesResponse::from(board))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
