//! Payment-link API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/wompi", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/test", get(handler::test_connection))
        .route("/create-payment", post(handler::create_payment))
}
