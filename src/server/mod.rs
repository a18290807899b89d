// Server module - axum HTTP server setup and routing

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::config::{Config, ErrorPolicy};
use crate::error::ServiceError;
use crate::imaging::ImageConfig;

pub mod form;
pub mod handler;
pub mod response;

pub use handler::{ConversionRoute, CONVERSION_ROUTES, RESIZE_PATH};

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub image: Arc<ImageConfig>,
    pub policy: ErrorPolicy,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            image: Arc::new(config.image.clone()),
            policy: config.server.error_policy,
        }
    }
}

/// Build the full route table
pub fn build_router(config: &Config) -> Router {
    let mut router = Router::new();

    for route in CONVERSION_ROUTES.iter() {
        router = router.route(
            route.path,
            post(
                move |State(state): State<AppState>,
                      multipart: Result<Multipart, MultipartRejection>| {
                    handler::convert(state, route, multipart)
                },
            ),
        );
    }

    router
        .route(
            RESIZE_PATH,
            post(
                |State(state): State<AppState>,
                 multipart: Result<Multipart, MultipartRejection>| {
                    handler::resize(state, multipart)
                },
            ),
        )
        .route("/health", get(handler::health))
        .route("/metrics", get(handler::metrics))
        .layer(DefaultBodyLimit::max(config.server.max_upload_size))
        .with_state(AppState::from_config(config))
}

/// Bind the listener and serve until ctrl-c or SIGTERM
pub async fn run(config: Config) -> Result<(), ServiceError> {
    let address = config.server.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServiceError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(
        address = %address,
        error_policy = ?config.server.error_policy,
        max_upload_size = config.server.max_upload_size,
        "imgconv listening"
    );

    axum::serve(listener, build_router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("imgconv stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
