//! User API module - admin only

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::ROLE_ADMIN;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_roles(&[ROLE_ADMIN])))
}
