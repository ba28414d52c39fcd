//! Store (floristería) Model
//!
//! A store is the unit of data isolation: every category and product belongs
//! to exactly one store. Wire field names stay the platform's public Spanish
//! names; see the serde renames.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Store ID type
pub type StoreId = RecordId;

/// Store model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<StoreId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Public storefront URL, validated as a well-formed URL on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Lowercase hostname derived from `url` when not supplied directly.
    /// Unique across stores; used as an alternate lookup key.
    #[serde(rename = "dominio", default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(
        rename = "activa",
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

/// Compact store view embedded in expanded responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreBrief {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<StoreId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Deserialize a fetched store reference, collapsing anything that is not an
/// expanded record (a dangling or never-resolved link) to None. Stores are
/// never existence-checked on writes, so such references are legal data.
pub fn brief_or_none<'de, D>(deserializer: D) -> Result<Option<StoreBrief>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Full(StoreBrief),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Full(brief)) => Some(brief),
        _ => None,
    })
}

/// Create store payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoreCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[validate(url(message = "URL inválida"))]
    pub url: Option<String>,
    #[serde(rename = "dominio")]
    pub domain: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "activa")]
    pub is_active: Option<bool>,
}

/// Update store payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoreUpdate {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[validate(url(message = "URL inválida"))]
    pub url: Option<String>,
    #[serde(rename = "dominio")]
    pub domain: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "activa")]
    pub is_active: Option<bool>,
}

/// Extract the lowercase hostname from a public URL.
///
/// Returns None for unparseable input or URLs without a host.
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .host_str()
        .map(|host| host.trim().to_lowercase())
        .filter(|host| !host.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_lowercase_hostname() {
        assert_eq!(
            extract_domain("https://MyStore.Example.com/shop"),
            Some("mystore.example.com".to_string())
        );
    }

    #[test]
    fn ignores_path_and_port() {
        assert_eq!(
            extract_domain("http://tienda.example.com:8080/a/b?c=d"),
            Some("tienda.example.com".to_string())
        );
    }

    #[test]
    fn rejects_invalid_urls() {
        assert_eq!(extract_domain("not a url"), None);
        assert_eq!(extract_domain(""), None);
    }
}
