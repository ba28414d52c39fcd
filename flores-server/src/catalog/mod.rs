//! Catalog core - multi-tenant resolution and category normalization
//!
//! The catalog endpoints accept ambiguous inputs on two axes:
//!
//! - the tenant may arrive as an explicit id, a derived domain, or a raw URL
//!   ([`tenant`]);
//! - category input on write paths may be an id, a JSON-encoded id, or a
//!   free-text name, possibly naming a category that does not exist yet
//!   ([`normalizer`]).
//!
//! [`filter`] composes the resolved tenant and category inputs into a single
//! product query; [`slug`] is the shared name-to-slug derivation.

pub mod filter;
pub mod normalizer;
pub mod slug;
pub mod tenant;

pub use filter::{CatalogFilter, CategoryClause, resolve_category_clause};
pub use normalizer::normalize_categories;
pub use slug::slugify;
pub use tenant::{TenantFilter, resolve_tenant};

#[cfg(test)]
mod tests {
    //! End-to-end catalog flow over an in-memory database

    use serde_json::json;

    use super::*;
    use crate::db::DbService;
    use crate::db::models::{ProductCreate, StoreCreate};
    use crate::db::repository::{
        CategoryRepository, ProductRepository, StoreRepository, make_record,
    };

    #[tokio::test]
    async fn tenant_catalog_roundtrip() {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());
        let categories = CategoryRepository::new(db.db.clone());
        let products = ProductRepository::new(db.db.clone());

        // Store created with a URL derives its domain
        let store = stores
            .create(StoreCreate {
                name: "Mi Tienda".to_string(),
                description: None,
                url: Some("https://mystore.example.com/shop".to_string()),
                domain: None,
                logo: None,
                is_active: None,
            })
            .await
            .unwrap();
        assert_eq!(store.domain.as_deref(), Some("mystore.example.com"));
        let store_id = store.id.clone().unwrap();

        // Category created through normalization gets the derived slug
        let cat_ids = normalize_categories(&categories, &json!(["Ramos"]), &store_id)
            .await
            .unwrap();
        assert_eq!(cat_ids.len(), 1);
        let ramos = categories
            .find_by_name_ci(&store_id, "ramos")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ramos.slug, "ramos");

        // Product referencing the category
        let product = products
            .create(
                ProductCreate {
                    name: "Ramo Primaveral".to_string(),
                    description: "Doce rosas".to_string(),
                    price: 25.0,
                    stock: Some(3),
                    image: None,
                    category: None,
                    categories: None,
                    store: None,
                },
                store_id.clone(),
                cat_ids,
            )
            .await
            .unwrap();
        assert_eq!(product.categories.len(), 1);
        assert_eq!(product.categories[0].name, "Ramos");

        // Listing by domain resolves the tenant and returns the product
        let tenant = resolve_tenant(&stores, None, Some("MyStore.Example.Com"))
            .await
            .unwrap();
        let store_filter = match tenant {
            TenantFilter::Id(id) => Some(id),
            other => panic!("expected tenant id, got {:?}", other),
        };
        let listed = products
            .list(&CatalogFilter {
                store: store_filter,
                category: CategoryClause::None,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Ramo Primaveral");

        // A stray tenant id resolves but matches nothing
        let listed = products
            .list(&CatalogFilter {
                store: Some(make_record("store", "000000000000000000000000")),
                category: CategoryClause::None,
            })
            .await
            .unwrap();
        assert!(listed.is_empty());
    }
}
