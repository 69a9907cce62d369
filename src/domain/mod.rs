//! Domain Layer
//!
//! Contains the connection target, pooling and schema value types, and the
//! gateway trait (port) implemented by the database adapter.
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::database_gateway::DatabaseGateway;
pub use models::backend::{BackendKind, ConnectionTarget};
pub use models::pool::{PoolPolicy, PoolStatus};
pub use models::schema::{SchemaError, SchemaRegistry, TableDefinition};
