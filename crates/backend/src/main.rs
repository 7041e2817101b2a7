pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

use shared::config;
use shared::state::AppState;
use usecases::u501_load_dataset::loader::FileSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    let config = config::load_config()?;

    system::tracing::initialize(
        &config::resolve_path(&config.logging.directory),
        &config.logging.filter,
    )?;

    let state = AppState::new(&config.explorer);

    // Preload the configured dataset; the server starts empty if it fails
    if let Some(initial) = &config.explorer.initial_dataset {
        let source = FileSource {
            path: config::resolve_path(initial),
        };
        match state
            .loader
            .load_now(&source, config.explorer.initial_collection.clone())
            .await
        {
            Ok(response) => tracing::info!("Initial dataset: {}", response.message),
            Err(e) => tracing::error!("Failed to load initial dataset {}: {}", initial, e),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(state, config.explorer.max_upload_bytes())
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server.host '{}': {}", config.server.host, e))?;
    let addr = SocketAddr::new(host, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. \
                     Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
