//! Catalog query building
//!
//! Composes the resolved tenant and an optional category input into one
//! product query. Category-name matching here is system-wide (not scoped to
//! the tenant) while category *creation* is tenant-scoped; the asymmetry is
//! inherited behavior and kept deliberately.

use surrealdb::RecordId;

use crate::db::repository::{CategoryRepository, RepoResult};

/// How the category part of a catalog request filters products
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryClause {
    /// No category input
    None,
    /// Products whose category set intersects these ids
    Ids(Vec<RecordId>),
    /// No category matched by name: exact case-insensitive match on the
    /// legacy free-text field (supports pre-migration data)
    Legacy(String),
}

/// Resolve raw category input into a clause.
///
/// Matches category names case-insensitively as an unanchored substring; if
/// nothing matches anywhere, the input falls back to the legacy field.
pub async fn resolve_category_clause(
    categories: &CategoryRepository,
    input: Option<&str>,
) -> RepoResult<CategoryClause> {
    let Some(input) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(CategoryClause::None);
    };

    let matched = categories.find_by_name_like(input).await?;
    let ids: Vec<RecordId> = matched.into_iter().filter_map(|c| c.id).collect();
    if ids.is_empty() {
        Ok(CategoryClause::Legacy(input.to_lowercase()))
    } else {
        Ok(CategoryClause::Ids(ids))
    }
}

/// Composed catalog filter
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    pub store: Option<RecordId>,
    pub category: CategoryClause,
}

/// A rendered product query: SQL text plus its typed bindings
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub sql: String,
    pub store: Option<RecordId>,
    pub category_ids: Option<Vec<RecordId>>,
    pub legacy: Option<String>,
}

impl CatalogFilter {
    /// Render the filter into a single SELECT with a stable sort (creation
    /// time, descending) and category references expanded for display.
    pub fn render(&self) -> ProductQuery {
        let mut conditions: Vec<&str> = Vec::new();
        let mut store = None;
        let mut category_ids = None;
        let mut legacy = None;

        if let Some(id) = &self.store {
            conditions.push("floristeria = $store");
            store = Some(id.clone());
        }

        match &self.category {
            CategoryClause::None => {}
            CategoryClause::Ids(ids) => {
                conditions.push("categorias CONTAINSANY $category_ids");
                category_ids = Some(ids.clone());
            }
            CategoryClause::Legacy(value) => {
                conditions.push("categoria != NONE AND string::lowercase(categoria) = $legacy");
                legacy = Some(value.clone());
            }
        }

        let mut sql = String::from("SELECT * FROM product");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY createdAt DESC FETCH categorias");

        ProductQuery {
            sql,
            store,
            category_ids,
            legacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::normalize_categories;
    use crate::db::DbService;
    use crate::db::models::{ProductCreate, StoreCreate};
    use crate::db::repository::{ProductRepository, StoreRepository, make_record};

    #[test]
    fn renders_unfiltered_listing() {
        let q = CatalogFilter {
            store: None,
            category: CategoryClause::None,
        }
        .render();
        assert_eq!(q.sql, "SELECT * FROM product ORDER BY createdAt DESC FETCH categorias");
        assert!(q.store.is_none() && q.category_ids.is_none() && q.legacy.is_none());
    }

    #[test]
    fn renders_combined_clauses() {
        let store = make_record("store", "aaaaaaaaaaaaaaaaaaaaaaaa");
        let cat = make_record("category", "bbbbbbbbbbbbbbbbbbbbbbbb");
        let q = CatalogFilter {
            store: Some(store.clone()),
            category: CategoryClause::Ids(vec![cat]),
        }
        .render();
        assert_eq!(
            q.sql,
            "SELECT * FROM product WHERE floristeria = $store \
             AND categorias CONTAINSANY $category_ids \
             ORDER BY createdAt DESC FETCH categorias"
        );
        assert_eq!(q.store, Some(store));
        assert_eq!(q.category_ids.map(|ids| ids.len()), Some(1));
    }

    #[test]
    fn renders_legacy_fallback() {
        let q = CatalogFilter {
            store: None,
            category: CategoryClause::Legacy("flores".to_string()),
        }
        .render();
        assert!(q.sql.contains("string::lowercase(categoria) = $legacy"));
        assert_eq!(q.legacy.as_deref(), Some("flores"));
    }

    async fn setup() -> (DbService, RecordId) {
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
        let id = store.id.unwrap();
        (db, id)
    }

    fn flower(name: &str, legacy: Option<&str>) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            description: "desc".to_string(),
            price: 10.0,
            stock: None,
            image: None,
            category: legacy.map(str::to_string),
            categories: None,
            store: None,
        }
    }

    #[tokio::test]
    async fn category_input_matches_by_substring() {
        let (db, store) = setup().await;
        let categories = CategoryRepository::new(db.db.clone());
        let products = ProductRepository::new(db.db.clone());

        let ids = normalize_categories(&categories, &json!(["Flores Exóticas"]), &store)
            .await
            .unwrap();
        products
            .create(flower("Orquídea", None), store.clone(), ids)
            .await
            .unwrap();

        let clause = resolve_category_clause(&categories, Some("flores"))
            .await
            .unwrap();
        assert!(matches!(clause, CategoryClause::Ids(_)));

        let listed = products
            .list(&CatalogFilter {
                store: Some(store),
                category: clause,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Orquídea");
    }

    #[tokio::test]
    async fn unmatched_category_falls_back_to_legacy_field() {
        let (db, store) = setup().await;
        let categories = CategoryRepository::new(db.db.clone());
        let products = ProductRepository::new(db.db.clone());

        products
            .create(flower("Clásica", Some("Flores")), store.clone(), Vec::new())
            .await
            .unwrap();
        products
            .create(flower("Otra", Some("Canastas")), store.clone(), Vec::new())
            .await
            .unwrap();

        // No category named like "flores" exists anywhere
        let clause = resolve_category_clause(&categories, Some("Flores"))
            .await
            .unwrap();
        assert_eq!(clause, CategoryClause::Legacy("flores".to_string()));

        let listed = products
            .list(&CatalogFilter {
                store: Some(store),
                category: clause,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Clásica");
    }

    #[tokio::test]
    async fn listing_sorts_newest_first() {
        let (db, store) = setup().await;
        let products = ProductRepository::new(db.db.clone());

        products
            .create(flower("Primera", None), store.clone(), Vec::new())
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        products
            .create(flower("Segunda", None), store.clone(), Vec::new())
            .await
            .unwrap();

        let listed = products
            .list(&CatalogFilter {
                store: Some(store),
                category: CategoryClause::None,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Segunda");
        assert_eq!(listed[1].name, "Primera");
    }
}
