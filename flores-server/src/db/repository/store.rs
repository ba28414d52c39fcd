//! Store Repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_record, new_record_key, strip_table_prefix};
use crate::db::models::{Store, StoreCreate, StoreUpdate, extract_domain};

pub const TABLE: &str = "store";

#[derive(Clone)]
pub struct StoreRepository {
    base: BaseRepository,
}

impl StoreRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all stores, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Store>> {
        let stores: Vec<Store> = self
            .base
            .db()
            .query("SELECT * FROM store ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(stores)
    }

    /// Find store by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Store>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let store: Option<Store> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(store)
    }

    /// Find store by exact (already lowercased) domain
    pub async fn find_by_domain(&self, domain: &str) -> RepoResult<Option<Store>> {
        let domain = domain.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM store WHERE dominio = $dominio LIMIT 1")
            .bind(("dominio", domain))
            .await?;
        let stores: Vec<Store> = result.take(0)?;
        Ok(stores.into_iter().next())
    }

    /// Find store by public identifier: the value is lowercased and compared
    /// exactly against the derived domain and, case-insensitively, against
    /// the raw URL. No partial or prefix matching.
    pub async fn find_by_public_identifier(&self, identifier: &str) -> RepoResult<Option<Store>> {
        let ident = identifier.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM store \
                 WHERE dominio = $ident \
                 OR (url != NONE AND string::lowercase(url) = $ident) \
                 LIMIT 1",
            )
            .bind(("ident", ident))
            .await?;
        let stores: Vec<Store> = result.take(0)?;
        Ok(stores.into_iter().next())
    }

    /// Create a new store.
    ///
    /// The domain is derived from the URL's hostname when not supplied
    /// directly, and is lowercased either way. A taken domain is a Duplicate.
    pub async fn create(&self, data: StoreCreate) -> RepoResult<Store> {
        let domain = resolve_domain(data.domain.as_deref(), data.url.as_deref());

        if let Some(d) = &domain
            && self.find_by_domain(d).await?.is_some()
        {
            return Err(RepoError::Duplicate(
                "Ese dominio ya está registrado".to_string(),
            ));
        }

        let now = Utc::now().timestamp_millis();
        let store = Store {
            id: None,
            name: data.name,
            description: data.description,
            url: data.url,
            domain,
            logo: data.logo,
            is_active: data.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Store> = self
            .base
            .db()
            .create((TABLE, new_record_key()))
            .content(store)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create store".to_string()))
    }

    /// Update a store.
    ///
    /// A supplied domain wins; otherwise a supplied URL re-derives it; with
    /// neither in the payload the stored domain is untouched.
    pub async fn update(&self, id: &str, data: StoreUpdate) -> RepoResult<Store> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Floristería no encontrada".to_string()))?;

        let new_domain = resolve_domain(data.domain.as_deref(), data.url.as_deref());

        if let Some(d) = &new_domain
            && existing.domain.as_deref() != Some(d.as_str())
            && self.find_by_domain(d).await?.is_some()
        {
            return Err(RepoError::Duplicate(
                "Ese dominio ya está registrado".to_string(),
            ));
        }

        #[derive(Serialize)]
        struct StoreUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            nombre: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            descripcion: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            url: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            dominio: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            logo: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            activa: Option<bool>,
            #[serde(rename = "updatedAt")]
            updated_at: i64,
        }

        let update_data = StoreUpdateDb {
            nombre: data.name,
            descripcion: data.description,
            url: data.url,
            dominio: new_domain,
            logo: data.logo,
            activa: data.is_active,
            updated_at: Utc::now().timestamp_millis(),
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
            .ok_or_else(|| RepoError::NotFound("Floristería no encontrada".to_string()))
    }

    /// Delete a store
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Store> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Floristería no encontrada".to_string()));
        }
        Ok(())
    }
}

/// An explicit domain wins over derivation; both end up trimmed + lowercased.
fn resolve_domain(domain: Option<&str>, url: Option<&str>) -> Option<String> {
    match domain.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => Some(d.to_lowercase()),
        None => url.and_then(extract_domain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn store_payload(name: &str, url: Option<&str>, domain: Option<&str>) -> StoreCreate {
        StoreCreate {
            name: name.to_string(),
            description: None,
            url: url.map(str::to_string),
            domain: domain.map(str::to_string),
            logo: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn derives_domain_from_url_once() {
        let db = DbService::memory().await.unwrap();
        let repo = StoreRepository::new(db.db.clone());

        let store = repo
            .create(store_payload(
                "Mi Tienda",
                Some("https://mystore.example.com/shop"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(store.domain.as_deref(), Some("mystore.example.com"));
    }

    #[tokio::test]
    async fn explicit_domain_wins_and_is_lowercased() {
        let db = DbService::memory().await.unwrap();
        let repo = StoreRepository::new(db.db.clone());

        let store = repo
            .create(store_payload(
                "Mi Tienda",
                Some("https://otra.example.com"),
                Some("Flores.Example.COM"),
            ))
            .await
            .unwrap();
        assert_eq!(store.domain.as_deref(), Some("flores.example.com"));
    }

    #[tokio::test]
    async fn duplicate_domain_is_a_conflict() {
        let db = DbService::memory().await.unwrap();
        let repo = StoreRepository::new(db.db.clone());

        repo.create(store_payload("Una", None, Some("flores.sv")))
            .await
            .unwrap();
        let err = repo
            .create(store_payload("Otra", None, Some("FLORES.SV")))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_with_new_url_rederives_domain() {
        let db = DbService::memory().await.unwrap();
        let repo = StoreRepository::new(db.db.clone());

        let store = repo
            .create(store_payload("Una", Some("https://vieja.example.com"), None))
            .await
            .unwrap();
        let id = crate::db::models::serde_helpers::record_id_to_string(store.id.as_ref().unwrap());

        let updated = repo
            .update(
                &id,
                StoreUpdate {
                    name: None,
                    description: None,
                    url: Some("https://nueva.example.com".to_string()),
                    domain: None,
                    logo: None,
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.domain.as_deref(), Some("nueva.example.com"));
        // URL untouched in the payload leaves the domain alone
        let updated = repo
            .update(
                &id,
                StoreUpdate {
                    name: Some("Renombrada".to_string()),
                    description: None,
                    url: None,
                    domain: None,
                    logo: None,
                    is_active: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.domain.as_deref(), Some("nueva.example.com"));
    }
}
