//! Product Repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_record, new_record_key, strip_table_prefix};
use crate::catalog::filter::CatalogFilter;
use crate::db::models::{Product, ProductCreate, ProductExpanded, ProductUpdate};

pub const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List products matching a catalog filter, newest first, with category
    /// references expanded
    pub async fn list(&self, filter: &CatalogFilter) -> RepoResult<Vec<ProductExpanded>> {
        let rendered = filter.render();
        let mut query = self.base.db().query(rendered.sql);
        if let Some(store) = rendered.store {
            query = query.bind(("store", store));
        }
        if let Some(ids) = rendered.category_ids {
            query = query.bind(("category_ids", ids));
        }
        if let Some(legacy) = rendered.legacy {
            query = query.bind(("legacy", legacy));
        }
        let products: Vec<ProductExpanded> = query.await?.take(0)?;
        Ok(products)
    }

    /// Find product by id (stored shape, category ids unexpanded)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Find product by id with categories expanded
    pub async fn find_by_id_expanded(&self, id: &str) -> RepoResult<Option<ProductExpanded>> {
        let record = make_record(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE id = $id FETCH categorias")
            .bind(("id", record))
            .await?;
        let products: Vec<ProductExpanded> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Find all products of one store, newest first, categories expanded
    pub async fn find_by_store(&self, store: &RecordId) -> RepoResult<Vec<ProductExpanded>> {
        let products: Vec<ProductExpanded> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE floristeria = $store \
                 ORDER BY createdAt DESC FETCH categorias",
            )
            .bind(("store", store.clone()))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Create a new product; `categories` are already-normalized references
    pub async fn create(
        &self,
        data: ProductCreate,
        store: RecordId,
        categories: Vec<RecordId>,
    ) -> RepoResult<ProductExpanded> {
        let now = Utc::now().timestamp_millis();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            stock: data.stock.unwrap_or(0),
            image: data.image,
            category: data.category,
            categories,
            store,
            created_at: now,
            updated_at: now,
        };

        let key = new_record_key();
        let created: Option<Product> = self
            .base
            .db()
            .create((TABLE, key.as_str()))
            .content(product)
            .await?;
        if created.is_none() {
            return Err(RepoError::Database("Failed to create product".to_string()));
        }

        self.find_by_id_expanded(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product; `categories` replaces the reference list only when
    /// the payload carried category input
    pub async fn update(
        &self,
        id: &str,
        data: ProductUpdate,
        categories: Option<Vec<RecordId>>,
    ) -> RepoResult<ProductExpanded> {
        let pure_id = strip_table_prefix(TABLE, id);
        if self.find_by_id(pure_id).await?.is_none() {
            return Err(RepoError::NotFound("Flor no encontrada".to_string()));
        }

        #[derive(Serialize)]
        struct ProductUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            nombre: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            descripcion: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            precio: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            stock: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            imagen: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            categoria: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            categorias: Option<Vec<RecordId>>,
            #[serde(rename = "updatedAt")]
            updated_at: i64,
        }

        let update_data = ProductUpdateDb {
            nombre: data.name,
            descripcion: data.description,
            precio: data.price,
            stock: data.stock,
            imagen: data.image,
            categoria: data.category,
            categorias: categories,
            updated_at: Utc::now().timestamp_millis(),
        };

        let record = make_record(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $record MERGE $data")
            .bind(("record", record))
            .bind(("data", update_data))
            .await?;

        self.find_by_id_expanded(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Flor no encontrada".to_string()))
    }

    /// Delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Product> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Flor no encontrada".to_string()));
        }
        Ok(())
    }
}
