//! Catalog (flores) API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    CatalogFilter, TenantFilter, normalize_categories, resolve_category_clause, resolve_tenant,
};
use crate::core::ServerState;
use crate::db::models::{ProductCreate, ProductExpanded, ProductUpdate};
use crate::db::repository::{
    CategoryRepository, ProductRepository, StoreRepository, make_record, store,
};
use crate::utils::{AppError, AppResult};

/// Catalog listing query parameters
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "floristeriaId")]
    pub store_id: Option<String>,
    pub dominio: Option<String>,
    pub categoria: Option<String>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// GET /api/flores - catalog listing
///
/// Accepts `floristeriaId`, `dominio` and `categoria`; an unresolvable
/// public identifier yields an empty list, not an error.
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CatalogQuery>,
) -> AppResult<Json<Vec<ProductExpanded>>> {
    let stores = StoreRepository::new(state.db.clone());
    let categories = CategoryRepository::new(state.db.clone());
    let products = ProductRepository::new(state.db.clone());

    let store = match resolve_tenant(
        &stores,
        params.store_id.as_deref(),
        params.dominio.as_deref(),
    )
    .await?
    {
        TenantFilter::Id(id) => Some(id),
        // No store for that identifier: zero products
        TenantFilter::NotFound => return Ok(Json(Vec::new())),
        TenantFilter::Unscoped => None,
    };

    let category = resolve_category_clause(&categories, params.categoria.as_deref()).await?;
    let listed = products.list(&CatalogFilter { store, category }).await?;
    Ok(Json(listed))
}

/// GET /api/flores/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductExpanded>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id_expanded(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Flor no encontrada"))?;
    Ok(Json(product))
}

/// GET /api/flores/floristeria/{store_id}
pub async fn list_by_store(
    State(state): State<ServerState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<Vec<ProductExpanded>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo
        .find_by_store(&make_record(store::TABLE, &store_id))
        .await?;
    Ok(Json(products))
}

/// POST /api/flores
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<ProductExpanded>)> {
    let store_id = payload
        .store
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("El campo \"floristeria\" es obligatorio"))?
        .to_string();

    if payload.price < 0.0 {
        return Err(AppError::validation("El precio no puede ser negativo"));
    }

    let store = make_record(store::TABLE, &store_id);
    let categories = CategoryRepository::new(state.db.clone());
    let category_ids = match &payload.categories {
        Some(raw) => normalize_categories(&categories, raw, &store).await?,
        None => Vec::new(),
    };

    let products = ProductRepository::new(state.db.clone());
    let created = products.create(payload, store, category_ids).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/flores/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductExpanded>> {
    if let Some(price) = payload.price
        && price < 0.0
    {
        return Err(AppError::validation("El precio no puede ser negativo"));
    }

    let products = ProductRepository::new(state.db.clone());
    let existing = products
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Flor no encontrada"))?;

    // Category input re-normalizes against the product's own store
    let category_ids = match &payload.categories {
        Some(raw) => {
            let categories = CategoryRepository::new(state.db.clone());
            Some(normalize_categories(&categories, raw, &existing.store).await?)
        }
        None => None,
    };

    let updated = products.update(&id, payload, category_ids).await?;
    Ok(Json(updated))
}

/// DELETE /api/flores/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Flor eliminada correctamente",
    }))
}
