//! Server state
//!
//! [`ServerState`] holds shared references to every service; it is cheap to
//! clone (Arc / handle semantics throughout) and is the axum state type.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{ImageHostService, PaymentLinkService};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// JWT service
    pub jwt_service: Arc<JwtService>,
    /// Payment-link provider client
    pub payments: Arc<PaymentLinkService>,
    /// Image-hosting client
    pub images: Arc<ImageHostService>,
}

impl ServerState {
    /// Initialize server state: database first, then the service singletons
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| AppError::internal(format!("Failed to create data dir: {e}")))?;

        let db_path = config.db_path();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let payments = Arc::new(PaymentLinkService::new(config.payment.clone()));
        let images = Arc::new(ImageHostService::new(config.image_host.clone()));

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service,
            payments,
            images,
        })
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
