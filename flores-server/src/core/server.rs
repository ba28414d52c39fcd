//! Server Implementation
//!
//! Router assembly, HTTP startup and graceful shutdown.

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

/// Build the axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .route("/", get(root))
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::stores::router())
        .merge(api::categories::router())
        .merge(api::products::router())
        .merge(api::users::router())
        .merge(api::payments::router())
        .merge(api::upload::router())
}

/// Simple liveness line on the root path
async fn root() -> &'static str {
    "API Tienda de Flores en funcionamiento"
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        // JWT auth applied at router level; require_auth skips public routes
        let app = build_app()
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🌸 Flores API listening on {}", addr);
        tracing::info!("Environment: {}", self.config.environment);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
