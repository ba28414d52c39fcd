//! API routing modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`auth`] - authentication
//! - [`stores`] - floristería management
//! - [`categories`] - category management
//! - [`products`] - catalog (flores)
//! - [`users`] - user management
//! - [`payments`] - payment-link integration
//! - [`upload`] - image upload

pub mod auth;
pub mod categories;
pub mod health;
pub mod payments;
pub mod products;
pub mod stores;
pub mod upload;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::AppResult;
