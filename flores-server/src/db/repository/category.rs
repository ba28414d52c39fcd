//! Category Repository
//!
//! Name uniqueness is tenant-scoped and case-insensitive: the stored
//! `name_key` (trimmed + lowercased name) participates in a unique compound
//! index together with the owning store, so a create that loses a race
//! resolves by re-reading the existing row.

use chrono::Utc;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_record, new_record_key, strip_table_prefix};
use crate::catalog::slugify;
use crate::db::models::{Category, CategoryCreate, CategoryExpanded, CategoryUpdate, DEFAULT_ICON};

pub const TABLE: &str = "category";

/// Case-insensitive lookup key for a category name
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories, optionally scoped to one store, with the owning
    /// store expanded to a summary
    pub async fn find_all(&self, store: Option<&RecordId>) -> RepoResult<Vec<CategoryExpanded>> {
        let categories: Vec<CategoryExpanded> = match store {
            Some(store) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM category WHERE floristeria = $store \
                         ORDER BY nombre FETCH floristeria",
                    )
                    .bind(("store", store.clone()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM category ORDER BY nombre FETCH floristeria")
                    .await?
                    .take(0)?
            }
        };
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let category: Option<Category> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(category)
    }

    /// Find category by id with the owning store expanded
    pub async fn find_by_id_expanded(&self, id: &str) -> RepoResult<Option<CategoryExpanded>> {
        let record = make_record(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE id = $id FETCH floristeria")
            .bind(("id", record))
            .await?;
        let categories: Vec<CategoryExpanded> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Find all categories of one store
    pub async fn find_by_store(&self, store: &RecordId) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE floristeria = $store ORDER BY nombre")
            .bind(("store", store.clone()))
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Case-insensitive exact name lookup within one store
    pub async fn find_by_name_ci(
        &self,
        store: &RecordId,
        name: &str,
    ) -> RepoResult<Option<Category>> {
        let key = name_key(name);
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM category \
                 WHERE floristeria = $store AND name_key = $key LIMIT 1",
            )
            .bind(("store", store.clone()))
            .bind(("key", key))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Unanchored, case-insensitive substring match on the name, across all
    /// stores. Listing-side matching is deliberately not tenant-scoped.
    pub async fn find_by_name_like(&self, input: &str) -> RepoResult<Vec<Category>> {
        let needle = input.trim().to_lowercase();
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE string::contains(string::lowercase(nombre), $needle)")
            .bind(("needle", needle))
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Create a new category from an explicit payload
    pub async fn create(&self, data: CategoryCreate, store: RecordId) -> RepoResult<Category> {
        let name = data.name.trim().to_string();
        if name.is_empty() {
            return Err(RepoError::Validation(
                "El nombre de la categoría es obligatorio".to_string(),
            ));
        }

        if self.find_by_name_ci(&store, &name).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Ya existe una categoría con ese nombre".to_string(),
            ));
        }

        let category = Category {
            id: None,
            name_key: name_key(&name),
            slug: data
                .slug
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| slugify(&name)),
            description: Some(
                data.description
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| format!("Categoría {}", name)),
            ),
            icon: Some(data.icon.unwrap_or_else(|| DEFAULT_ICON.to_string())),
            image: data.image,
            store,
            created_at: Utc::now().timestamp_millis(),
            name,
        };

        self.insert(category).await
    }

    /// Look up a category by name within the store, creating it with default
    /// slug/description/icon when absent. A concurrent creator winning the
    /// unique index means our insert fails; the existing row is returned.
    pub async fn get_or_create(&self, store: &RecordId, name: &str) -> RepoResult<Category> {
        if let Some(existing) = self.find_by_name_ci(store, name).await? {
            return Ok(existing);
        }

        let name = name.trim().to_string();
        let category = Category {
            id: None,
            name_key: name_key(&name),
            slug: slugify(&name),
            description: Some(format!("Categoría {}", name)),
            icon: Some(DEFAULT_ICON.to_string()),
            image: None,
            store: store.clone(),
            created_at: Utc::now().timestamp_millis(),
            name: name.clone(),
        };

        match self.insert(category).await {
            Ok(created) => Ok(created),
            Err(err) => {
                // Lost the race: the unique index rejected us, fetch the winner
                if let Some(existing) = self.find_by_name_ci(store, &name).await.ok().flatten() {
                    return Ok(existing);
                }
                Err(err)
            }
        }
    }

    async fn insert(&self, category: Category) -> RepoResult<Category> {
        let created: Option<Category> = self
            .base
            .db()
            .create((TABLE, new_record_key()))
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Categoría no encontrada".to_string()))?;

        let target_store = match &data.store {
            Some(s) => make_record(super::store::TABLE, s),
            None => existing.store.clone(),
        };

        if let Some(new_name) = &data.name
            && name_key(new_name) != existing.name_key
            && self.find_by_name_ci(&target_store, new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(
                "Ya existe una categoría con ese nombre".to_string(),
            ));
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            nombre: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            name_key: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            descripcion: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            icono: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            imagen: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            floristeria: Option<RecordId>,
        }

        // A renamed category regenerates its slug unless one is supplied
        let slug = match (&data.slug, &data.name) {
            (Some(slug), _) => Some(slug.clone()),
            (None, Some(name)) => Some(slugify(name)),
            (None, None) => None,
        };

        let update_data = CategoryUpdateDb {
            name_key: data.name.as_deref().map(name_key),
            nombre: data.name,
            slug,
            descripcion: data.description,
            icono: data.icon,
            imagen: data.image,
            floristeria: data.store.map(|s| make_record(super::store::TABLE, &s)),
        };

        let pure_id = strip_table_prefix(TABLE, id);
        let record = make_record(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $record MERGE $data")
            .bind(("record", record))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Categoría no encontrada".to_string()))
    }

    /// Delete a category; referencing products keep their (now dangling)
    /// reference, deletion does not cascade
    pub async fn delete(&self, id: &str) -> RepoResult<Category> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Category> = self.base.db().delete((TABLE, pure_id)).await?;
        deleted.ok_or_else(|| RepoError::NotFound("Categoría no encontrada".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::StoreCreate;
    use crate::db::repository::StoreRepository;

    async fn setup() -> (DbService, CategoryRepository, RecordId) {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());
        let store = stores
            .create(StoreCreate {
                name: "Tienda".to_string(),
                description: None,
                url: None,
                domain: None,
                logo: None,
                is_active: None,
            })
            .await
            .unwrap();
        let store_id = store.id.unwrap();
        let repo = CategoryRepository::new(db.db.clone());
        (db, repo, store_id)
    }

    fn payload(name: &str, store: Option<String>) -> CategoryCreate {
        CategoryCreate {
            name: name.to_string(),
            slug: None,
            description: None,
            icon: None,
            image: None,
            store,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let (_db, repo, store) = setup().await;

        let created = repo
            .create(payload("Canastas Navideñas", None), store)
            .await
            .unwrap();
        assert_eq!(created.slug, "canastas-navidenas");
        assert_eq!(
            created.description.as_deref(),
            Some("Categoría Canastas Navideñas")
        );
        assert_eq!(created.icon.as_deref(), Some(DEFAULT_ICON));
        assert_eq!(created.name_key, "canastas navideñas");
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_case_insensitively() {
        let (_db, repo, store) = setup().await;

        repo.create(payload("Ramos", None), store.clone()).await.unwrap();
        let err = repo
            .create(payload("  ramos ", None), store)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn same_name_allowed_across_stores() {
        let (db, repo, store) = setup().await;

        let stores = StoreRepository::new(db.db.clone());
        let other = stores
            .create(StoreCreate {
                name: "Otra".to_string(),
                description: None,
                url: None,
                domain: None,
                logo: None,
                is_active: None,
            })
            .await
            .unwrap();

        repo.create(payload("Ramos", None), store).await.unwrap();
        repo.create(payload("Ramos", None), other.id.unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rename_regenerates_slug_and_name_key() {
        let (_db, repo, store) = setup().await;

        let created = repo.create(payload("Ramos", None), store).await.unwrap();
        let id = crate::db::models::serde_helpers::record_id_to_string(created.id.as_ref().unwrap());

        let updated = repo
            .update(
                &id,
                CategoryUpdate {
                    name: Some("Orquídeas Exóticas".to_string()),
                    slug: None,
                    description: None,
                    icon: None,
                    image: None,
                    store: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Orquídeas Exóticas");
        assert_eq!(updated.slug, "orquideas-exoticas");
        assert_eq!(updated.name_key, "orquídeas exóticas");
    }
}
