//! Database Models

// Serde helpers
pub mod serde_helpers;

// Tenancy
pub mod store;

// Catalog
pub mod category;
pub mod product;

// Auth
pub mod user;

// Re-exports
pub use store::{Store, StoreBrief, StoreCreate, StoreId, StoreUpdate, extract_domain};
pub use category::{
    Category, CategoryCreate, CategoryExpanded, CategoryId, CategoryUpdate, DEFAULT_ICON,
};
pub use product::{Product, ProductCreate, ProductExpanded, ProductId, ProductUpdate};
pub use user::{ROLE_ADMIN, ROLE_USER, User, UserCreate, UserExpanded, UserId};
