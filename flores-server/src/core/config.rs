//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | PORT | 3000 | HTTP listen port |
//! | DATA_DIR | ./data | Database directory |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_LEVEL | info | Default log filter (RUST_LOG wins) |
//! | LOG_DIR | - | Daily-rolling log file directory |
//! | JWT_SECRET / JWT_EXPIRATION_MINUTES / JWT_ISSUER / JWT_AUDIENCE | see auth | JWT settings |
//! | WOMPI_* | see services | Payment provider settings |
//! | IMAGE_HOST_URL / IMAGE_HOST_KEY | - | Image host settings |
//! | ADMIN_USER / ADMIN_PASS | - | Fallback admin credentials |

use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::services::{ImageHostConfig, PaymentConfig};

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Directory holding the embedded database
    pub data_dir: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Default log level (RUST_LOG takes precedence)
    pub log_level: String,
    /// Optional log-file directory
    pub log_dir: Option<String>,
    /// JWT settings
    pub jwt: JwtConfig,
    /// Payment provider settings
    pub payment: PaymentConfig,
    /// Image host settings
    pub image_host: ImageHostConfig,
    /// Fallback admin credentials (login works without a DB user)
    pub admin_user: Option<String>,
    pub admin_pass: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::default(),
            payment: PaymentConfig::from_env(),
            image_host: ImageHostConfig::from_env(),
            admin_user: std::env::var("ADMIN_USER").ok(),
            admin_pass: std::env::var("ADMIN_PASS").ok(),
        }
    }

    /// Path of the embedded database
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("flores.db")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
