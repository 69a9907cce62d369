//! Domain Models
//!
//! Value objects describing where the database lives, how its connections
//! are pooled and which tables it must hold.

pub mod backend;
pub mod pool;
pub mod schema;

pub use backend::{BackendKind, ConnectionTarget};
pub use pool::{PoolPolicy, PoolStatus};
pub use schema::{SchemaError, SchemaRegistry, TableDefinition};
