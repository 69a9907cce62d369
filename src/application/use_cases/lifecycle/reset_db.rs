//! Reset Database Use Case
//!
//! Drops and recreates every registered table. The two steps are not atomic:
//! a failure in between leaves the schema partially dropped.

use std::sync::Arc;

use super::{DropDbUseCase, InitDbUseCase};
use crate::domain::gateways::DatabaseGateway;
use crate::domain::models::schema::SchemaRegistry;
use crate::shared::errors::UseCaseError;

/// Use case for resetting the database schema
pub struct ResetDbUseCase {
    drop_db: DropDbUseCase,
    init_db: InitDbUseCase,
}

impl ResetDbUseCase {
    /// Create a new ResetDbUseCase
    #[must_use]
    pub fn new(gateway: Arc<dyn DatabaseGateway>, schema: Arc<SchemaRegistry>) -> Self {
        Self {
            drop_db: DropDbUseCase::new(gateway.clone(), schema.clone()),
            init_db: InitDbUseCase::new(gateway, schema),
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns the first failure from dropping or recreating the tables.
    pub async fn execute(&self) -> Result<(), UseCaseError> {
        self.drop_db.execute().await?;
        self.init_db.execute().await
    }
}
