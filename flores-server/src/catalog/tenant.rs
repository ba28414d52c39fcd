//! Tenant resolution
//!
//! Catalog requests identify their store either by explicit id
//! (`floristeriaId`) or by public identifier (`dominio`, which may also carry
//! a raw URL). The resolver turns that pair into a [`TenantFilter`].

use surrealdb::RecordId;

use crate::db::repository::{RepoResult, StoreRepository, make_record, store};

/// Outcome of tenant resolution for a catalog request
#[derive(Debug, Clone, PartialEq)]
pub enum TenantFilter {
    /// Scope the query to this store
    Id(RecordId),
    /// A public identifier was given but no store matches; the caller
    /// returns an empty result set
    NotFound,
    /// No identifying parameter; the caller lists across all stores
    Unscoped,
}

/// Resolve a store from an explicit id or a public identifier.
///
/// An explicit id is passed through untouched - no existence check here; a
/// query against a nonexistent store simply yields zero products, which the
/// catalog treats the same as "tenant not found". A public identifier is
/// lowercased and matched exactly against the derived domain or the raw URL.
pub async fn resolve_tenant(
    stores: &StoreRepository,
    explicit_id: Option<&str>,
    public_identifier: Option<&str>,
) -> RepoResult<TenantFilter> {
    if let Some(id) = explicit_id.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(TenantFilter::Id(make_record(store::TABLE, id)));
    }

    if let Some(ident) = public_identifier.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(match stores.find_by_public_identifier(ident).await? {
            Some(found) => match found.id {
                Some(id) => TenantFilter::Id(id),
                None => TenantFilter::NotFound,
            },
            None => TenantFilter::NotFound,
        });
    }

    Ok(TenantFilter::Unscoped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::StoreCreate;

    async fn seed(stores: &StoreRepository, name: &str, url: Option<&str>, domain: Option<&str>) {
        stores
            .create(StoreCreate {
                name: name.to_string(),
                description: None,
                url: url.map(str::to_string),
                domain: domain.map(str::to_string),
                logo: None,
                is_active: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn explicit_id_passes_through_unchecked() {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());

        let resolved = resolve_tenant(&stores, Some("abcdefabcdefabcdefabcdef"), None)
            .await
            .unwrap();
        assert_eq!(
            resolved,
            TenantFilter::Id(make_record("store", "abcdefabcdefabcdefabcdef"))
        );
    }

    #[tokio::test]
    async fn domain_lookup_is_case_insensitive() {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());
        seed(&stores, "Tienda", Some("https://flores.example.com"), None).await;

        for ident in ["flores.example.com", "FLORES.EXAMPLE.COM", "Flores.Example.Com"] {
            let resolved = resolve_tenant(&stores, None, Some(ident)).await.unwrap();
            assert!(matches!(resolved, TenantFilter::Id(_)), "ident: {ident}");
        }
    }

    #[tokio::test]
    async fn url_matches_exactly_not_by_prefix() {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());
        seed(
            &stores,
            "Tienda",
            Some("https://flores.example.com/shop"),
            None,
        )
        .await;

        // The full URL matches case-insensitively
        let resolved = resolve_tenant(&stores, None, Some("HTTPS://flores.example.com/shop"))
            .await
            .unwrap();
        assert!(matches!(resolved, TenantFilter::Id(_)));

        // A prefix of the URL does not
        let resolved = resolve_tenant(&stores, None, Some("https://flores.example.com/"))
            .await
            .unwrap();
        assert_eq!(resolved, TenantFilter::NotFound);
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found() {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());
        seed(&stores, "Tienda", None, Some("flores.example.com")).await;

        let resolved = resolve_tenant(&stores, None, Some("otra.example.com"))
            .await
            .unwrap();
        assert_eq!(resolved, TenantFilter::NotFound);
    }

    #[tokio::test]
    async fn no_parameters_means_unscoped() {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());

        let resolved = resolve_tenant(&stores, None, None).await.unwrap();
        assert_eq!(resolved, TenantFilter::Unscoped);

        let resolved = resolve_tenant(&stores, Some("  "), Some("")).await.unwrap();
        assert_eq!(resolved, TenantFilter::Unscoped);
    }
}
