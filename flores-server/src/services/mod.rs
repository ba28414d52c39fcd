//! External-service clients
//!
//! - [`payment_link`] - payment-provider integration (token + payment links)
//! - [`image_host`] - image-hosting collaborator (binary buffer in, URL out)

pub mod image_host;
pub mod payment_link;

pub use image_host::{ImageHostConfig, ImageHostService};
pub use payment_link::{PaymentConfig, PaymentLinkService};
