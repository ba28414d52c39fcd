//! Category Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use super::store::StoreBrief;

pub type CategoryId = RecordId;

/// Default icon for categories created without one
pub const DEFAULT_ICON: &str = "🌸";

/// Category model
///
/// `name_key` is the trimmed, lowercased name. It backs the unique compound
/// index `(floristeria, name_key)` that makes concurrent create-by-name
/// converge on a single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<CategoryId>,
    #[serde(rename = "nombre")]
    pub name: String,
    pub slug: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "icono", default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Owning store
    #[serde(rename = "floristeria", with = "serde_helpers::record_id")]
    pub store: RecordId,
    pub name_key: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

/// Category with the owning store expanded to a summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryExpanded {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<CategoryId>,
    #[serde(rename = "nombre")]
    pub name: String,
    pub slug: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "icono", default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Owning store summary; None when the reference no longer resolves
    #[serde(
        rename = "floristeria",
        default,
        deserialize_with = "super::store::brief_or_none"
    )]
    pub store: Option<StoreBrief>,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    pub slug: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "icono")]
    pub icon: Option<String>,
    #[serde(rename = "imagen")]
    pub image: Option<String>,
    /// Owning store id (`store:<id>` or bare id)
    #[serde(rename = "floristeria")]
    pub store: Option<String>,
}

/// Update category payload
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryUpdate {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "icono")]
    pub icon: Option<String>,
    #[serde(rename = "imagen")]
    pub image: Option<String>,
    #[serde(rename = "floristeria")]
    pub store: Option<String>,
}
