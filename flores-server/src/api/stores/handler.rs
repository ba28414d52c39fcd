//! Store (floristería) API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Store, StoreCreate, StoreUpdate};
use crate::db::repository::StoreRepository;
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// GET /api/floristerias
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Store>>> {
    let repo = StoreRepository::new(state.db.clone());
    let stores = repo.find_all().await?;
    Ok(Json(stores))
}

/// GET /api/floristerias/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Store>> {
    let repo = StoreRepository::new(state.db.clone());
    let store = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Floristería no encontrada"))?;
    Ok(Json(store))
}

/// POST /api/floristerias - the domain is derived from the URL by the
/// repository when not supplied directly
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<(StatusCode, Json<Store>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = StoreRepository::new(state.db.clone());
    let created = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/floristerias/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StoreUpdate>,
) -> AppResult<Json<Store>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = StoreRepository::new(state.db.clone());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/floristerias/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = StoreRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Floristería eliminada correctamente",
    }))
}
