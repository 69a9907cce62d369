//! Drop Database Use Case
//!
//! Drops every registered table. Destroys all data in them.

use std::sync::Arc;

use crate::domain::gateways::DatabaseGateway;
use crate::domain::models::schema::SchemaRegistry;
use crate::shared::errors::UseCaseError;

/// Use case for dropping the database schema
pub struct DropDbUseCase {
    gateway: Arc<dyn DatabaseGateway>,
    schema: Arc<SchemaRegistry>,
}

impl DropDbUseCase {
    /// Create a new DropDbUseCase
    #[must_use]
    pub fn new(gateway: Arc<dyn DatabaseGateway>, schema: Arc<SchemaRegistry>) -> Self {
        Self { gateway, schema }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Database` if a table cannot be dropped. Tables
    /// dropped before the failure stay dropped.
    pub async fn execute(&self) -> Result<(), UseCaseError> {
        tracing::warn!(tables = ?self.schema.table_names(), "Dropping all database tables");

        if let Err(err) = self.gateway.drop_tables(&self.schema).await {
            tracing::error!(error = %err, "Failed to drop database tables");
            return Err(err.into());
        }

        tracing::warn!("All database tables dropped");
        Ok(())
    }
}
