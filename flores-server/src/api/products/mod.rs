//! Catalog (flores) API module
//!
//! Reads are public storefront surface; writes require an authenticated
//! admin or store user.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::{ROLE_ADMIN, ROLE_USER};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/flores", routes())
}

fn routes() -> Router<ServerState> {
    // Public catalog reads (the storefront lists without a token)
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/floristeria/{store_id}", get(handler::list_by_store))
        .route("/{id}", get(handler::get_by_id));

    // Protected writes
    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_roles(&[ROLE_ADMIN, ROLE_USER])));

    read_routes.merge(manage_routes)
}
