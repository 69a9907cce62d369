//! REST API Module
//!
//! Shared application state, the per-request session extractor and the
//! diagnostic HTTP handlers.

pub mod extract;
pub mod handlers;

use std::sync::Arc;

use crate::application::use_cases::{CheckConnectionUseCase, PoolStatusUseCase};
use crate::domain::gateways::DatabaseGateway;
use crate::infrastructure::driven_adapters::database::{
    DatabaseHandle, SessionFactory, SqlxDatabaseGateway,
};

pub use extract::DbSession;

/// Application state shared across all handlers.
///
/// Holds the single connection handle (through the session factory) for the
/// whole process; clones share it.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionFactory,
    pub gateway: Arc<dyn DatabaseGateway>,
    pub check_connection_use_case: Arc<CheckConnectionUseCase>,
    pub pool_status_use_case: Arc<PoolStatusUseCase>,
}

impl AppState {
    /// Wire the session factory, gateway and diagnostic use cases around
    /// one connection handle
    #[must_use]
    pub fn new(handle: DatabaseHandle) -> Self {
        let sessions = SessionFactory::new(Arc::new(handle));
        let gateway: Arc<dyn DatabaseGateway> = Arc::new(SqlxDatabaseGateway::new(sessions.clone()));

        Self {
            sessions,
            check_connection_use_case: Arc::new(CheckConnectionUseCase::new(gateway.clone())),
            pool_status_use_case: Arc::new(PoolStatusUseCase::new(gateway.clone())),
            gateway,
        }
    }
}
