//! Database Gateway
//!
//! Abstract trait defining the contract for schema lifecycle and
//! diagnostic operations against the process-wide connection handle.

use async_trait::async_trait;

use crate::domain::models::backend::BackendKind;
use crate::domain::models::pool::PoolStatus;
use crate::domain::models::schema::SchemaRegistry;
use crate::shared::errors::DatabaseError;

/// Gateway trait for schema and connectivity operations
#[async_trait]
pub trait DatabaseGateway: Send + Sync {
    /// Backend the underlying connection handle talks to
    fn backend(&self) -> BackendKind;

    /// Create every registered table that does not exist yet, in order
    async fn create_tables(&self, schema: &SchemaRegistry) -> Result<(), DatabaseError>;

    /// Drop every registered table, in reverse order
    async fn drop_tables(&self, schema: &SchemaRegistry) -> Result<(), DatabaseError>;

    /// Run a liveness query on a throwaway connection
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Run a liveness query inside a freshly opened session, then close it
    async fn ping_session(&self) -> Result<(), DatabaseError>;

    /// Live pool counters
    fn pool_status(&self) -> PoolStatus;
}
