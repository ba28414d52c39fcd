//! Flores API - multi-tenant flower-shop backend
//!
//! # Architecture
//!
//! - **Catalog core** (`catalog`): tenant resolution, category
//!   normalization, slug derivation and catalog query building
//! - **Database** (`db`): embedded SurrealDB models and repositories
//! - **Auth** (`auth`): JWT + argon2
//! - **HTTP API** (`api`): RESTful interface
//! - **External services** (`services`): payment links, image hosting
//!
//! # Module layout
//!
//! ```text
//! flores-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, role middleware
//! ├── catalog/       # tenant + category resolution core
//! ├── db/            # database layer
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # payment provider, image host
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: dotenv plus logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; missing files are fine
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ________
   / ____/ /___  ________  _____
  / /_  / / __ \/ ___/ _ \/ ___/
 / __/ / / /_/ / /  /  __(__  )
/_/   /_/\____/_/   \___/____/
    "#
    );
}
