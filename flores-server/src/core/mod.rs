//! Core module - server configuration, state and HTTP server
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared service references
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, build_app};
pub use state::ServerState;
