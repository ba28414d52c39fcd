//! Shared types for the flower-shop platform
//!
//! Request/response DTOs used by the API server and available to Rust
//! clients of the platform.

pub mod client;

// Re-exports
pub use serde::{Deserialize, Serialize};
