//! sqlx Database Gateway
//!
//! Implements the DatabaseGateway trait on top of the connection handle.

use std::sync::Arc;

use async_trait::async_trait;

use super::handle::DatabaseHandle;
use super::session::SessionFactory;
use crate::domain::gateways::DatabaseGateway;
use crate::domain::models::backend::BackendKind;
use crate::domain::models::pool::PoolStatus;
use crate::domain::models::schema::SchemaRegistry;
use crate::shared::errors::DatabaseError;

/// sqlx implementation of DatabaseGateway
pub struct SqlxDatabaseGateway {
    handle: Arc<DatabaseHandle>,
    sessions: SessionFactory,
}

impl SqlxDatabaseGateway {
    /// Create a gateway sharing the given session factory's handle
    #[must_use]
    pub fn new(sessions: SessionFactory) -> Self {
        Self {
            handle: Arc::clone(sessions.handle()),
            sessions,
        }
    }
}

#[async_trait]
impl DatabaseGateway for SqlxDatabaseGateway {
    fn backend(&self) -> BackendKind {
        self.handle.backend()
    }

    async fn create_tables(&self, schema: &SchemaRegistry) -> Result<(), DatabaseError> {
        for table in schema.iter() {
            self.handle
                .pool()
                .execute(&table.create_statement())
                .await
                .map_err(|source| DatabaseError::Schema {
                    action: "create",
                    table: table.name().to_string(),
                    source,
                })?;
            tracing::debug!(table = table.name(), "Table ensured");
        }
        Ok(())
    }

    async fn drop_tables(&self, schema: &SchemaRegistry) -> Result<(), DatabaseError> {
        let backend = self.handle.backend();
        for table in schema.iter().rev() {
            self.handle
                .pool()
                .execute(&table.drop_statement(backend))
                .await
                .map_err(|source| DatabaseError::Schema {
                    action: "drop",
                    table: table.name().to_string(),
                    source,
                })?;
            tracing::debug!(table = table.name(), "Table dropped");
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.handle.ping().await
    }

    async fn ping_session(&self) -> Result<(), DatabaseError> {
        self.sessions
            .with_session(|session| Box::pin(async move { session.ping().await }))
            .await
    }

    fn pool_status(&self) -> PoolStatus {
        self.handle.pool_status()
    }
}
