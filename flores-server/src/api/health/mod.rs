//! Health-check routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |
//! | /health/ping | GET | none |

use std::time::{Instant, SystemTime};

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// Health router - public (no auth required)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ping", get(ping))
}

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    /// ok | error
    status: &'static str,
    version: &'static str,
    environment: String,
    uptime_seconds: u64,
    database: CheckResult,
}

/// Single check result
#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

// Server start time (lazily initialized)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// GET /health - status, version and a database round trip
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let database = match state.db.query("RETURN 1").await {
        Ok(_) => CheckResult::ok_with_latency(started.elapsed().as_millis() as u64),
        Err(e) => CheckResult::error(e.to_string()),
    };

    let status = if database.status == "ok" { "healthy" } else { "unhealthy" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        uptime_seconds: uptime_seconds(),
        database,
    })
}

#[derive(Serialize)]
pub struct PingResponse {
    message: &'static str,
    timestamp: String,
}

/// GET /health/ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
