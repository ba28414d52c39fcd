//! Store (floristería) API module
//!
//! Reads are available to any authenticated user; mutations are admin-only.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::{ROLE_ADMIN, ROLE_USER};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/floristerias", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_roles(&[ROLE_ADMIN, ROLE_USER])));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_roles(&[ROLE_ADMIN])));

    read_routes.merge(manage_routes)
}
