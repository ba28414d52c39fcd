//! User Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use super::store::StoreBrief;

pub type UserId = RecordId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "usuario";

/// User model
///
/// `password` holds the argon2 hash and is never serialized back out.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub username: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(
        rename = "floristeria",
        default,
        with = "serde_helpers::option_record_id"
    )]
    pub store: Option<RecordId>,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

/// User view with the store expanded to a summary; the password hash is
/// excluded at the query level and absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExpanded {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(
        rename = "floristeria",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::store::brief_or_none"
    )]
    pub store: Option<StoreBrief>,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

/// Create user payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
    #[serde(rename = "floristeria")]
    pub store: Option<String>,
}

impl User {
    /// Verify a password against the stored argon2 hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = User::hash_password("s3creta").unwrap();
        let user = User {
            id: None,
            username: "ana".to_string(),
            password: hash,
            role: ROLE_USER.to_string(),
            store: None,
            created_at: 0,
        };
        assert!(user.verify_password("s3creta").unwrap());
        assert!(!user.verify_password("otra").unwrap());
    }
}
