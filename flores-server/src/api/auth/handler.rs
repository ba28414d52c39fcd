//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::ROLE_ADMIN;
use crate::db::models::serde_helpers::record_id_to_string;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Authenticates against the user table; when the username has no DB record,
/// the env-configured fallback admin credentials are checked instead. Both
/// failure paths share one message to prevent username enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Usuario y contraseña requeridos"));
    }

    let users = UserRepository::new(state.db.clone());
    let user = users.find_by_username(&req.username).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if let Some(user) = user {
        let password_valid = user
            .verify_password(&req.password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

        if !password_valid {
            tracing::warn!(username = %req.username, "Login failed - invalid credentials");
            return Err(AppError::invalid_credentials());
        }

        let user_id = user.id.as_ref().map(record_id_to_string).unwrap_or_default();
        let store = user.store.as_ref().map(record_id_to_string);

        let token = state
            .get_jwt_service()
            .generate_token(&user_id, &user.username, &user.role, store.as_deref())
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

        tracing::info!(username = %user.username, role = %user.role, "User logged in");

        return Ok(Json(LoginResponse {
            token,
            user: UserInfo {
                id: Some(user_id),
                username: user.username,
                role: user.role,
                store,
            },
        }));
    }

    // No DB user: allow the env-configured admin credentials
    if let (Some(admin_user), Some(admin_pass)) =
        (&state.config.admin_user, &state.config.admin_pass)
        && req.username == *admin_user
        && req.password == *admin_pass
    {
        let token = state
            .get_jwt_service()
            .generate_token(admin_user, admin_user, ROLE_ADMIN, None)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

        tracing::info!(username = %admin_user, "Fallback admin logged in");

        return Ok(Json(LoginResponse {
            token,
            user: UserInfo {
                id: None,
                username: admin_user.clone(),
                role: ROLE_ADMIN.to_string(),
                store: None,
            },
        }));
    }

    tracing::warn!(username = %req.username, "Login failed - user not found");
    Err(AppError::invalid_credentials())
}
