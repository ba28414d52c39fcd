//! User Repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, make_record, new_record_key, strip_table_prefix};
use crate::db::models::{ROLE_USER, User, UserCreate, UserExpanded};

pub const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users, newest first, password hash omitted and store expanded
    pub async fn find_all(&self) -> RepoResult<Vec<UserExpanded>> {
        let users: Vec<UserExpanded> = self
            .base
            .db()
            .query(
                "SELECT * OMIT password FROM user \
                 ORDER BY createdAt DESC FETCH floristeria",
            )
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by username (includes the password hash, login path only)
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a user with an argon2-hashed password
    pub async fn create(
        &self,
        data: UserCreate,
        store: Option<RecordId>,
    ) -> RepoResult<UserExpanded> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(
                "El nombre de usuario ya está en uso".to_string(),
            ));
        }

        let hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

        #[derive(Serialize)]
        struct UserDb {
            username: String,
            password: String,
            role: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            floristeria: Option<RecordId>,
            #[serde(rename = "createdAt")]
            created_at: i64,
        }

        let record = UserDb {
            username: data.username.clone(),
            password: hash,
            role: data.role.unwrap_or_else(|| ROLE_USER.to_string()),
            floristeria: store,
            created_at: Utc::now().timestamp_millis(),
        };

        let key = new_record_key();
        let created: Option<User> = match self
            .base
            .db()
            .create((TABLE, key.as_str()))
            .content(record)
            .await
        {
            Ok(created) => created,
            Err(err) => {
                // Unique username index may have rejected a concurrent create
                if self.find_by_username(&data.username).await?.is_some() {
                    return Err(RepoError::Duplicate(
                        "El nombre de usuario ya está en uso".to_string(),
                    ));
                }
                return Err(err.into());
            }
        };
        if created.is_none() {
            return Err(RepoError::Database("Failed to create user".to_string()));
        }

        self.find_by_id_expanded(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    async fn find_by_id_expanded(&self, id: &str) -> RepoResult<Option<UserExpanded>> {
        let record = make_record(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT * OMIT password FROM user WHERE id = $id FETCH floristeria")
            .bind(("id", record))
            .await?;
        let users: Vec<UserExpanded> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<User> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Usuario no encontrado".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn payload(username: &str) -> UserCreate {
        UserCreate {
            username: username.to_string(),
            password: "s3creta".to_string(),
            role: None,
            store: None,
        }
    }

    #[tokio::test]
    async fn creates_user_with_hashed_password() {
        let db = DbService::memory().await.unwrap();
        let repo = UserRepository::new(db.db.clone());

        let created = repo.create(payload("ana"), None).await.unwrap();
        assert_eq!(created.username, "ana");
        assert_eq!(created.role, ROLE_USER);

        let stored = repo.find_by_username("ana").await.unwrap().unwrap();
        assert_ne!(stored.password, "s3creta");
        assert!(stored.verify_password("s3creta").unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let db = DbService::memory().await.unwrap();
        let repo = UserRepository::new(db.db.clone());

        repo.create(payload("ana"), None).await.unwrap();
        let err = repo.create(payload("ana"), None).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn delete_unknown_user_is_not_found() {
        let db = DbService::memory().await.unwrap();
        let repo = UserRepository::new(db.db.clone());

        let err = repo.delete("ffffffffffffffffffffffff").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
