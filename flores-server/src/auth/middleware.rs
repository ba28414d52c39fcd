//! Authentication middleware
//!
//! Axum middleware for JWT authentication and role checks.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

/// Authentication middleware applied at the router level.
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`, then
/// injects [`CurrentUser`] into the request extensions.
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/` (root, health)
/// - `POST /api/auth/login`
/// - the public storefront surface: `GET` on `/api/flores…`, everything
///   under `/api/categorias…`, and the payment-link endpoints
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes (root, health) are public
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or_else(AppError::invalid_token)?
        }
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing authorization header");
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Token validation failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// Public API surface: readable (or, for categories and payments, callable)
/// without a token so the storefront can work unauthenticated.
fn is_public_api_route(method: &http::Method, path: &str) -> bool {
    if path == "/api/auth/login" {
        return true;
    }
    if path.starts_with("/api/categorias") || path.starts_with("/api/wompi") {
        return true;
    }
    if method == http::Method::GET && path.starts_with("/api/flores") {
        return true;
    }
    false
}

/// Role-check middleware - requires one of the given roles.
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/flores", post(handler::create))
///     .route_layer(middleware::from_fn(require_roles(&["admin", "usuario"])));
/// ```
pub fn require_roles(
    roles: &'static [&'static str],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !roles.contains(&user.role.as_str()) {
                tracing::warn!(
                    target: "security",
                    username = %user.username,
                    role = %user.role,
                    required = ?roles,
                    "Role check failed"
                );
                return Err(AppError::forbidden("Acceso denegado"));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_surface_matches_storefront_routes() {
        let get = http::Method::GET;
        let post = http::Method::POST;

        assert!(is_public_api_route(&post, "/api/auth/login"));
        assert!(is_public_api_route(&get, "/api/flores"));
        assert!(is_public_api_route(&get, "/api/flores/abc"));
        assert!(is_public_api_route(&post, "/api/categorias"));
        assert!(is_public_api_route(&post, "/api/wompi/create-payment"));

        assert!(!is_public_api_route(&post, "/api/flores"));
        assert!(!is_public_api_route(&get, "/api/floristerias"));
        assert!(!is_public_api_route(&get, "/api/users"));
    }
}
