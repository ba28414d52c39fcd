//! Authentication - JWT service, middleware and the current-user extension

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_roles};

use crate::db::models::ROLE_ADMIN;

/// Authenticated user injected into request extensions by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: String,
    /// Affiliated store id, if any
    pub store: Option<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
            store: claims.store,
        }
    }
}
