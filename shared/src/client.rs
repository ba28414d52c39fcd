//! Client-related types shared between server and clients
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
///
/// `store` carries the id of the floristería the user is affiliated with,
/// when any. The env-configured fallback admin has no id and no store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub role: String,
    #[serde(
        rename = "floristeria",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub store: Option<String>,
}

// =============================================================================
// Payment-link API DTOs
// =============================================================================

/// Payment-link creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLinkRequest {
    pub amount_in_cents: i64,
    pub currency: String,
    pub reference: String,
    pub customer_email: String,
    /// RFC 3339 expiry; defaults to 24 hours from now when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Payment-link creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLinkResponse {
    pub success: bool,
    pub payment_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}
