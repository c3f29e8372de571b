//! Application builder and server loop.

use std::future::IntoFuture;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use catalog_core::error::{AppError, ErrorKind};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::timeout::build_timeout_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(build_timeout_layer(server.request_timeout_seconds))
        .layer(build_compression_layer())
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Serve `state` until Ctrl+C or SIGTERM, then drain in-flight requests for
/// up to `server.shutdown_grace_seconds`.
pub async fn run_server(state: AppState) -> Result<(), AppError> {
    let server_config = state.config.server.clone();
    let addr = server_config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;
    info!(%addr, "Catalog server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let app = build_app(state);

    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .into_future(),
    );

    tokio::select! {
        joined = &mut server => return flatten(joined),
        _ = shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(true);
    let grace = Duration::from_secs(server_config.shutdown_grace_seconds);
    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed; aborting");
            server.abort();
            Ok(())
        }
    }
}

fn flatten(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match joined {
        Ok(Ok(())) => {
            info!("Server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(AppError::from(e)),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
