//! Check Connection Use Case
//!
//! Advisory health check: failures are logged and reduced to `false`.

use std::sync::Arc;

use crate::domain::gateways::DatabaseGateway;

/// Use case for checking database connectivity
pub struct CheckConnectionUseCase {
    gateway: Arc<dyn DatabaseGateway>,
}

impl CheckConnectionUseCase {
    /// Create a new CheckConnectionUseCase
    #[must_use]
    pub fn new(gateway: Arc<dyn DatabaseGateway>) -> Self {
        Self { gateway }
    }

    /// Execute the use case, returning whether the database answered
    pub async fn execute(&self) -> bool {
        match self.gateway.ping_session().await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "Database connection check failed");
                false
            }
        }
    }
}
