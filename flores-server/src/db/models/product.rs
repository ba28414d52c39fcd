//! Product (flor) Model
//!
//! Products carry two category representations during the migration window:
//! the legacy free-text `categoria` field and the newer `categorias` list of
//! category references. Both are kept; stored data and external consumers
//! still depend on the singular field.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::category::Category;
use super::serde_helpers;

pub type ProductId = RecordId;

/// Product model as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProductId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Legacy single free-text category
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ordered category references, store-scoped
    #[serde(rename = "categorias", default, with = "serde_helpers::vec_record_id")]
    pub categories: Vec<RecordId>,
    /// Owning store; required and immutable in normal operation
    #[serde(rename = "floristeria", with = "serde_helpers::record_id")]
    pub store: RecordId,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

/// Product with category references expanded to full records (display shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductExpanded {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProductId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Expanded category records; references that no longer resolve are
    /// dropped from the display list (deletion does not cascade)
    #[serde(
        rename = "categorias",
        default,
        deserialize_with = "expanded_or_skip"
    )]
    pub categories: Vec<Category>,
    #[serde(rename = "floristeria", with = "serde_helpers::record_id")]
    pub store: RecordId,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

/// Keep only list elements that arrived as fully expanded category records
fn expanded_or_skip<'de, D>(deserializer: D) -> Result<Vec<Category>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Full(Category),
        Other(serde::de::IgnoredAny),
    }

    let items = Vec::<Repr>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|repr| match repr {
            Repr::Full(category) => Some(category),
            Repr::Other(_) => None,
        })
        .collect())
}

/// Create product payload
///
/// `categorias` is deliberately a raw JSON value: callers send a string, an
/// array, or a JSON-encoded string; the category normalizer resolves it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: Option<i64>,
    #[serde(rename = "imagen")]
    pub image: Option<String>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "categorias")]
    pub categories: Option<serde_json::Value>,
    #[serde(rename = "floristeria")]
    pub store: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProductUpdate {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Option<f64>,
    pub stock: Option<i64>,
    #[serde(rename = "imagen")]
    pub image: Option<String>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "categorias")]
    pub categories: Option<serde_json::Value>,
}
