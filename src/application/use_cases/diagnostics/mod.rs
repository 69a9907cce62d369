//! Diagnostic Use Cases
//!
//! Advisory connectivity check and connection pool reporting.

mod check_connection;
mod pool_status;

pub use check_connection::CheckConnectionUseCase;
pub use pool_status::PoolStatusUseCase;
