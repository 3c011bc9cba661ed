use board_server::board::DepartureBoard;
use board_server::config::BoardConfig;
use board_server::mbta::{MbtaClient, MockMbtaClient};
use board_server::web::{AppState, TransitSource, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Bad configuration is fatal at startup
    let config = BoardConfig::from_env().expect("Invalid configuration");

    let source = match &config.mock_dir {
        Some(dir) => {
            let mock = MockMbtaClient::new(dir).expect("Failed to load mock data");
            info!(dir = %dir.display(), routes = mock.available_routes().len(), "Serving mock data");
            TransitSource::Mock(mock)
        }
        None => {
            info!(base_url = %config.mbta.base_url, "Using live MBTA API");
            TransitSource::Live(
                MbtaClient::new(config.mbta.clone()).expect("Failed to create MBTA client"),
            )
        }
    };

    let stop = config.board.stop.clone();
    let board = DepartureBoard::new(source, config.board.clone());
    let state = AppState::new(board, config.title.as_str());

    let static_dir = config.static_dir.to_string_lossy();
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.addr, stop = %stop, "Departure board listening");

    axum::serve(listener, app).await.expect("Server error");
}
