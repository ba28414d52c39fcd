//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{ROLE_ADMIN, ROLE_USER, UserCreate, UserExpanded};
use crate::db::repository::{UserRepository, make_record, store};
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// GET /api/users - password hashes never leave the repository
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserExpanded>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(Json(users))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserExpanded>)> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Usuario y contraseña requeridos"));
    }

    if let Some(role) = payload.role.as_deref()
        && role != ROLE_ADMIN
        && role != ROLE_USER
    {
        return Err(AppError::validation("Rol inválido"));
    }

    let store_ref = payload
        .store
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| make_record(store::TABLE, s));

    let repo = UserRepository::new(state.db.clone());
    let created = repo.create(payload, store_ref).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = UserRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Usuario eliminado correctamente",
    }))
}
