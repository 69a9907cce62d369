//! Init Database Use Case
//!
//! Creates every registered table that is missing, then confirms the
//! database answers a liveness query.

use std::sync::Arc;

use crate::domain::gateways::DatabaseGateway;
use crate::domain::models::schema::SchemaRegistry;
use crate::shared::errors::UseCaseError;

/// Use case for initializing the database schema
pub struct InitDbUseCase {
    gateway: Arc<dyn DatabaseGateway>,
    schema: Arc<SchemaRegistry>,
}

impl InitDbUseCase {
    /// Create a new InitDbUseCase
    #[must_use]
    pub fn new(gateway: Arc<dyn DatabaseGateway>, schema: Arc<SchemaRegistry>) -> Self {
        Self { gateway, schema }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Database` if a table cannot be created or the
    /// connection test fails.
    pub async fn execute(&self) -> Result<(), UseCaseError> {
        if let Err(err) = self.gateway.create_tables(&self.schema).await {
            tracing::error!(error = %err, "Failed to create database tables");
            return Err(err.into());
        }
        tracing::info!(tables = self.schema.len(), "Database tables created successfully");

        if let Err(err) = self.gateway.ping().await {
            tracing::error!(error = %err, "Database connection test failed");
            return Err(err.into());
        }
        tracing::info!(backend = %self.gateway.backend(), "Database connection test successful");

        Ok(())
    }
}
