//! Upload Routes
//!
//! Image upload for authenticated users; the buffer is validated here and
//! forwarded to the image host, which owns storage and serving.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/upload", post(handler::upload))
}
