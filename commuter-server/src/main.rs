use std::net::SocketAddr;
use std::process::ExitCode;

use commuter_server::clock::SystemClock;
use commuter_server::config::{ConfigError, ServerConfig};
use commuter_server::mbta::{MbtaClient, MbtaError, MockGateway, TransitGateway};
use commuter_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Fatal startup errors.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mbta(#[from] MbtaError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("commuter_server=info,tower_http=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    match &config.mock_dir {
        Some(dir) => {
            let mock = MockGateway::from_dir(dir)?;
            info!(dir = %dir.display(), documents = mock.len(), "serving mock MBTA data");
            serve(mock, config.addr).await
        }
        None => {
            if config.mbta.api_key.is_empty() {
                warn!("MBTA_KEY not set; requests will be anonymous and rate limited");
            }
            let client = MbtaClient::new(config.mbta)?;
            info!(base_url = client.base_url(), "using live MBTA API");
            serve(client, config.addr).await
        }
    }
}

async fn serve<G>(gateway: G, addr: SocketAddr) -> Result<(), StartupError>
where
    G: TransitGateway + 'static,
{
    let app = create_router(AppState::new(gateway, SystemClock));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Commuter rail departure board listening on http://{addr}");
    info!("  GET  /health     - Health check");
    info!("  POST /page-info  - Departures for North and South Station");

    axum::serve(listener, app).await?;
    Ok(())
}
