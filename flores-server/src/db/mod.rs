//! Database Module
//!
//! Embedded SurrealDB: RocksDB-backed on disk, in-memory engine for tests.
//! Schema definitions (unique indexes) are applied at startup.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "flores";
const DATABASE: &str = "flores";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database and apply schema definitions
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(&db).await?;
        tracing::info!("Database connection established ({db_path})");
        Ok(Self { db })
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open memory database: {e}")))?;

        Self::prepare(&db).await?;
        Ok(Self { db })
    }

    async fn prepare(db: &Surreal<Db>) -> Result<(), AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(db).await
    }
}

/// Apply schema definitions.
///
/// The compound unique index on category `(floristeria, name_key)` is what
/// lets concurrent create-by-name requests converge on a single row: the
/// loser of the race hits the index and re-reads the winner's record.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE INDEX IF NOT EXISTS category_store_name ON TABLE category FIELDS floristeria, name_key UNIQUE;
         DEFINE INDEX IF NOT EXISTS user_username ON TABLE user FIELDS username UNIQUE;",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_on_disk_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flores.db");
        let service = DbService::new(&path.to_string_lossy()).await.unwrap();
        service.db.query("RETURN 1").await.unwrap();
    }
}
