//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{TenantFilter, resolve_tenant};
use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryExpanded, CategoryUpdate};
use crate::db::repository::{CategoryRepository, StoreRepository, make_record, store};
use crate::utils::{AppError, AppResult};

/// Category listing query parameters
#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    #[serde(rename = "floristeriaId")]
    pub store_id: Option<String>,
    pub dominio: Option<String>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// GET /api/categorias - all categories, optionally scoped by store or domain
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CategoryListQuery>,
) -> AppResult<Json<Vec<CategoryExpanded>>> {
    let stores = StoreRepository::new(state.db.clone());
    let categories = CategoryRepository::new(state.db.clone());

    let scope = match resolve_tenant(
        &stores,
        params.store_id.as_deref(),
        params.dominio.as_deref(),
    )
    .await?
    {
        TenantFilter::Id(id) => Some(id),
        TenantFilter::NotFound => return Ok(Json(Vec::new())),
        TenantFilter::Unscoped => None,
    };

    let listed = categories.find_all(scope.as_ref()).await?;
    Ok(Json(listed))
}

/// GET /api/categorias/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryExpanded>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_id_expanded(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Categoría no encontrada"))?;
    Ok(Json(category))
}

/// GET /api/categorias/floristeria/{store_id}
pub async fn list_by_store(
    State(state): State<ServerState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo
        .find_by_store(&make_record(store::TABLE, &store_id))
        .await?;
    Ok(Json(categories))
}

/// POST /api/categorias
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let store_id = payload
        .store
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("El campo \"floristeria\" es obligatorio"))?
        .to_string();

    let repo = CategoryRepository::new(state.db.clone());
    let created = repo
        .create(payload, make_record(store::TABLE, &store_id))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/categorias/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/categorias/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = CategoryRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    tracing::info!(name = %deleted.name, "Category deleted");
    Ok(Json(MessageResponse {
        message: "Categoría eliminada correctamente",
    }))
}
