//! Database Connection Management
//!
//! Process-wide connection handle, session factory and the sqlx gateway
//! used by the schema lifecycle and diagnostic use cases.

pub mod gateway;
pub mod handle;
pub mod schema;
pub mod session;

pub use gateway::SqlxDatabaseGateway;
pub use handle::{DatabaseHandle, DatabasePool, HandleSettings, MANAGED_CONNECT_TIMEOUT};
pub use schema::churn_schema;
pub use session::{Session, SessionFactory, SessionFuture};
