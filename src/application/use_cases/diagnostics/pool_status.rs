//! Pool Status Use Case
//!
//! Reads the live connection pool counters.

use std::sync::Arc;

use crate::domain::gateways::DatabaseGateway;
use crate::domain::models::pool::PoolStatus;

/// Use case for reporting connection pool status
pub struct PoolStatusUseCase {
    gateway: Arc<dyn DatabaseGateway>,
}

impl PoolStatusUseCase {
    /// Create a new PoolStatusUseCase
    #[must_use]
    pub fn new(gateway: Arc<dyn DatabaseGateway>) -> Self {
        Self { gateway }
    }

    /// Current pool counters
    #[must_use]
    pub fn execute(&self) -> PoolStatus {
        self.gateway.pool_status()
    }

    /// Log the current pool counters and return them
    pub fn log(&self) -> PoolStatus {
        let status = self.execute();
        tracing::info!(
            backend = %self.gateway.backend(),
            pool_size = status.pool_size,
            checked_in = status.checked_in,
            checked_out = status.checked_out,
            overflow = status.overflow,
            total_connection = status.total_connection,
            "Connection pool status"
        );
        status
    }
}
