//! Repository Module
//!
//! Provides CRUD operations over the embedded SurrealDB tables.
//!
//! ID convention: the full stack uses the `"table:id"` string format. Keys
//! are 24-character lowercase hex strings; [`make_record`] accepts both
//! prefixed and bare ids.

pub mod category;
pub mod product;
pub mod store;
pub mod user;

// Re-exports
pub use category::CategoryRepository;
pub use product::ProductRepository;
pub use store::StoreRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Generate a fresh 24-character lowercase hex record key
pub fn new_record_key() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    hex[..24].to_string()
}

/// Extract the pure id if it carries the table prefix
/// (e.g. `"category:xxx"` -> `"xxx"`)
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((prefix, rest)) if prefix == table => rest,
        _ => id,
    }
}

/// Build a RecordId from a table name and a (possibly prefixed) id
pub fn make_record(table: &str, id: &str) -> RecordId {
    RecordId::from_table_key(table, strip_table_prefix(table, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys_are_24_hex_chars() {
        let key = new_record_key();
        assert_eq!(key.len(), 24);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn strips_matching_prefix_only() {
        assert_eq!(strip_table_prefix("category", "category:abc"), "abc");
        assert_eq!(strip_table_prefix("category", "abc"), "abc");
        assert_eq!(strip_table_prefix("category", "store:abc"), "store:abc");
    }
}
