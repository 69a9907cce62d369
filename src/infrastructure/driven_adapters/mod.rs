//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Configuration
//! - Connection handle, sessions and the sqlx database gateway

pub mod config;
pub mod database;

pub use config::AppConfig;
pub use database::{DatabaseHandle, Session, SessionFactory, SqlxDatabaseGateway};
