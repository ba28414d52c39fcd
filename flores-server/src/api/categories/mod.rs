//! Category API module
//!
//! The whole category surface is public, matching the platform's existing
//! storefront contract.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categorias", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Must come before /{id} to avoid path conflicts
        .route("/floristeria/{store_id}", get(handler::list_by_store))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
