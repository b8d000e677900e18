use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::cli::ServeArgs;
use crate::config::initialize_app_state_with_url;
use crate::router::create_router;

pub async fn serve(args: &ServeArgs) -> Result<()> {
    trace!("Entering serve function");
    info!("Koperasi server starting up");
    debug!("Database URL: {}", args.database_url);

    let app = build_app(args).await?;
    run_server(app, &args.bind_address()).await
}

/// Initialize application state and build the router for `args`.
pub(crate) async fn build_app(args: &ServeArgs) -> Result<Router> {
    trace!("Initializing application state");
    let state = match initialize_app_state_with_url(&args.database_url, args.settings()).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");
    Ok(app)
}

/// Bind `bind_address` and serve `app` until Ctrl-C.
pub(crate) async fn run_server(app: Router, bind_address: &str) -> Result<()> {
    info!("Starting server on {}", bind_address);
    trace!("Attempting to bind TCP listener to {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Koperasi server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);
    debug!("Server is ready to accept connections");

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
