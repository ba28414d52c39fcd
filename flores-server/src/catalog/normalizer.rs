//! Category normalization
//!
//! Write paths accept category input in several shapes: a single string, an
//! array, a JSON-encoded string holding an array, or a JSON-encoded string
//! holding a single value. Individual entries may be category ids
//! (24-char hex, bare or wrapped in stray array/quote decoration) or plain
//! names. Everything resolves to an ordered list of category references
//! scoped to one store, creating categories by name as needed.
//!
//! Callers must have a store in hand before normalizing; a missing owning
//! store on the request is rejected at the handler as a validation error.

use serde_json::Value;
use surrealdb::RecordId;

use crate::db::repository::{CategoryRepository, RepoResult};

/// Length of an identifier-shaped hex token
const ID_LEN: usize = 24;

fn is_hex_id(s: &str) -> bool {
    s.len() == ID_LEN && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Pick the id candidate out of an entry, if it has one.
///
/// Accepts the bare 24-hex token (optionally `category:`-prefixed) and
/// tolerates malformed JSON-array-like decoration - stray brackets, quotes,
/// commas, whitespace - around exactly one token. Anything else is a name.
fn id_candidate(entry: &str) -> Option<String> {
    let bare = entry.strip_prefix("category:").unwrap_or(entry);
    if is_hex_id(bare) {
        return Some(bare.to_lowercase());
    }

    let cleaned: String = entry
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '\'' | ',') && !c.is_whitespace())
        .collect();
    let cleaned = cleaned.strip_prefix("category:").unwrap_or(&cleaned);
    if is_hex_id(cleaned) {
        Some(cleaned.to_lowercase())
    } else {
        None
    }
}

/// Flatten raw category input into a sequence of string entries.
///
/// A JSON-encoded string is decoded one level; its elements are taken as-is.
pub fn flatten_raw(raw: &Value) -> Vec<String> {
    match raw {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().filter_map(element_to_string).collect(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items.iter().filter_map(element_to_string).collect(),
            Ok(Value::String(inner)) => vec![inner],
            Ok(Value::Null) => Vec::new(),
            Ok(other) => vec![other.to_string()],
            Err(_) => vec![s.clone()],
        },
        other => vec![other.to_string()],
    }
}

fn element_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Normalize raw category input into an ordered list of category references
/// belonging to `store`.
///
/// Per entry, in precedence order:
/// 1. an id candidate is used directly when that category exists *and*
///    belongs to `store`; otherwise the entry falls through to (2);
/// 2. the entry is a name: case-insensitive exact match after trimming, or a
///    new category with derived slug and default description/icon.
///
/// Blank entries are skipped. Output order follows first resolution;
/// duplicates are preserved.
pub async fn normalize_categories(
    categories: &CategoryRepository,
    raw: &Value,
    store: &RecordId,
) -> RepoResult<Vec<RecordId>> {
    let mut resolved = Vec::new();

    for entry in flatten_raw(raw) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        if let Some(key) = id_candidate(entry)
            && let Some(category) = categories.find_by_id(&key).await?
            && category.store == *store
            && let Some(id) = category.id
        {
            resolved.push(id);
            continue;
        }

        // Unresolvable ids land here too: the token becomes a literal name
        let category = categories.get_or_create(store, entry).await?;
        if let Some(id) = category.id {
            resolved.push(id);
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::DbService;
    use crate::db::models::StoreCreate;
    use crate::db::repository::{StoreRepository, make_record};

    #[test]
    fn flattens_arrays_strings_and_encoded_forms() {
        assert_eq!(flatten_raw(&json!(["Rosas", "Tulipanes"])), vec!["Rosas", "Tulipanes"]);
        assert_eq!(flatten_raw(&json!("Rosas")), vec!["Rosas"]);
        assert_eq!(
            flatten_raw(&json!("[\"Rosas\",\"Tulipanes\"]")),
            vec!["Rosas", "Tulipanes"]
        );
        assert_eq!(flatten_raw(&json!("\"Rosas\"")), vec!["Rosas"]);
        assert_eq!(flatten_raw(&Value::Null), Vec::<String>::new());
        // Non-string array elements are stringified, nulls dropped
        assert_eq!(flatten_raw(&json!([1, null, "x"])), vec!["1", "x"]);
    }

    #[test]
    fn id_candidates_tolerate_decoration() {
        let id = "64a1b2c3d4e5f6a7b8c9d0e1";
        assert_eq!(id_candidate(id).as_deref(), Some(id));
        assert_eq!(id_candidate(&format!("category:{id}")).as_deref(), Some(id));
        assert_eq!(id_candidate(&format!("[\"{id}\"]")).as_deref(), Some(id));
        assert_eq!(id_candidate(&format!("\"{id}\"")).as_deref(), Some(id));
        assert_eq!(id_candidate(&format!("[{id}")).as_deref(), Some(id));
        // Uppercase hex still reads as an id, lowercased for lookup
        assert_eq!(
            id_candidate("64A1B2C3D4E5F6A7B8C9D0E1").as_deref(),
            Some(id)
        );
        // Two tokens, a short token, or interleaved text are names
        assert_eq!(id_candidate(&format!("{id},{id}")), None);
        assert_eq!(id_candidate("64a1b2"), None);
        assert_eq!(id_candidate("Ramos"), None);
        assert_eq!(id_candidate(&format!("x{id}y")), None);
    }

    async fn setup() -> (DbService, StoreRepository, CategoryRepository, RecordId) {
        let db = DbService::memory().await.unwrap();
        let stores = StoreRepository::new(db.db.clone());
        let categories = CategoryRepository::new(db.db.clone());
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
        (db, stores, categories, store_id)
    }

    #[tokio::test]
    async fn creates_missing_category_by_name() {
        let (_db, _stores, categories, store) = setup().await;

        let ids = normalize_categories(&categories, &json!(["Flores"]), &store)
            .await
            .unwrap();
        assert_eq!(ids.len(), 1);

        let created = categories
            .find_by_name_ci(&store, "Flores")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.name, "Flores");
        assert_eq!(created.slug, "flores");
        assert_eq!(created.description.as_deref(), Some("Categoría Flores"));
        assert_eq!(created.icon.as_deref(), Some("🌸"));
        assert_eq!(created.id.unwrap(), ids[0]);
    }

    #[tokio::test]
    async fn reuses_existing_category_case_insensitively() {
        let (_db, _stores, categories, store) = setup().await;

        let first = normalize_categories(&categories, &json!(["Flores"]), &store)
            .await
            .unwrap();
        let second = normalize_categories(&categories, &json!(["flores"]), &store)
            .await
            .unwrap();
        assert_eq!(first, second);

        let all = categories.find_by_store(&store).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn known_id_resolves_directly() {
        let (_db, _stores, categories, store) = setup().await;

        let existing = categories.get_or_create(&store, "Ramos").await.unwrap();
        let id = existing.id.clone().unwrap();
        let id_str = crate::db::models::serde_helpers::record_id_to_string(&id);

        let ids = normalize_categories(&categories, &json!([id_str]), &store)
            .await
            .unwrap();
        assert_eq!(ids, vec![id]);

        let all = categories.find_by_store(&store).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn decorated_id_resolves_like_bare_id() {
        let (_db, _stores, categories, store) = setup().await;

        let existing = categories.get_or_create(&store, "Ramos").await.unwrap();
        let id_str =
            crate::db::models::serde_helpers::record_id_to_string(existing.id.as_ref().unwrap());
        let key = id_str.split_once(':').unwrap().1.to_string();
        let decorated = format!("[\"{key}\"]");

        let ids = normalize_categories(&categories, &json!([decorated]), &store)
            .await
            .unwrap();
        assert_eq!(ids, vec![existing.id.unwrap()]);
    }

    #[tokio::test]
    async fn unknown_hex_id_becomes_a_literal_name() {
        let (_db, _stores, categories, store) = setup().await;

        let phantom = "64a1b2c3d4e5f6a7b8c9d0e1";
        let ids = normalize_categories(&categories, &json!([phantom]), &store)
            .await
            .unwrap();
        assert_eq!(ids.len(), 1);

        let created = categories
            .find_by_name_ci(&store, phantom)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.name, phantom);
    }

    #[tokio::test]
    async fn foreign_store_id_falls_through_to_name() {
        let (_db, stores, categories, store) = setup().await;

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
        let other_id = other.id.unwrap();
        let foreign = categories.get_or_create(&other_id, "Ramos").await.unwrap();
        let foreign_id =
            crate::db::models::serde_helpers::record_id_to_string(foreign.id.as_ref().unwrap());
        let foreign_key = foreign_id.split_once(':').unwrap().1.to_string();

        let ids = normalize_categories(&categories, &json!([foreign_key]), &store)
            .await
            .unwrap();
        assert_eq!(ids.len(), 1);

        // A new category was created in *this* store, named by the token
        let created = categories
            .find_by_name_ci(&store, &foreign_key)
            .await
            .unwrap();
        assert!(created.is_some());
    }

    #[tokio::test]
    async fn blank_entries_are_skipped_and_duplicates_preserved() {
        let (_db, _stores, categories, store) = setup().await;

        let ids = normalize_categories(
            &categories,
            &json!(["Flores", "", "  ", "Flores"]),
            &store,
        )
        .await
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn nonexistent_store_reference_still_creates() {
        let (_db, _stores, categories, _store) = setup().await;

        // The normalizer trusts the store id it is given
        let ghost = make_record("store", "ffffffffffffffffffffffff");
        let ids = normalize_categories(&categories, &json!(["Flores"]), &ghost)
            .await
            .unwrap();
        assert_eq!(ids.len(), 1);
    }
}
