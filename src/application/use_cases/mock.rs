//! Scriptable DatabaseGateway used by the use case tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::gateways::DatabaseGateway;
use crate::domain::models::backend::BackendKind;
use crate::domain::models::pool::PoolStatus;
use crate::domain::models::schema::{SchemaRegistry, TableDefinition};
use crate::shared::errors::DatabaseError;

pub(crate) struct MockDatabaseGateway {
    backend: BackendKind,
    status: PoolStatus,
    calls: Mutex<Vec<String>>,
    create_result: Mutex<Option<Result<(), DatabaseError>>>,
    drop_result: Mutex<Option<Result<(), DatabaseError>>>,
    ping_result: Mutex<Option<Result<(), DatabaseError>>>,
    ping_session_result: Mutex<Option<Result<(), DatabaseError>>>,
}

impl MockDatabaseGateway {
    pub(crate) fn new() -> Self {
        Self {
            backend: BackendKind::Postgres,
            status: PoolStatus::default(),
            calls: Mutex::new(Vec::new()),
            create_result: Mutex::new(None),
            drop_result: Mutex::new(None),
            ping_result: Mutex::new(None),
            ping_session_result: Mutex::new(None),
        }
    }

    pub(crate) fn with_status(mut self, status: PoolStatus) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn with_create(self, result: Result<(), DatabaseError>) -> Self {
        *self.create_result.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn with_drop(self, result: Result<(), DatabaseError>) -> Self {
        *self.drop_result.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn with_ping(self, result: Result<(), DatabaseError>) -> Self {
        *self.ping_result.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn with_ping_session(self, result: Result<(), DatabaseError>) -> Self {
        *self.ping_session_result.lock().unwrap() = Some(result);
        self
    }

    /// Calls recorded so far, e.g. `["drop:customers,predictions", "ping"]`
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn take(slot: &Mutex<Option<Result<(), DatabaseError>>>) -> Result<(), DatabaseError> {
    slot.lock().unwrap().take().unwrap_or(Ok(()))
}

pub(crate) fn schema(names: &[&str]) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    for name in names {
        registry
            .register(TableDefinition::new(*name, "id INTEGER PRIMARY KEY").unwrap())
            .unwrap();
    }
    registry
}

pub(crate) fn failure() -> DatabaseError {
    DatabaseError::Connection(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl DatabaseGateway for MockDatabaseGateway {
    fn backend(&self) -> BackendKind {
        self.backend
    }

    async fn create_tables(&self, schema: &SchemaRegistry) -> Result<(), DatabaseError> {
        self.record(format!("create:{}", schema.table_names().join(",")));
        take(&self.create_result)
    }

    async fn drop_tables(&self, schema: &SchemaRegistry) -> Result<(), DatabaseError> {
        self.record(format!("drop:{}", schema.table_names().join(",")));
        take(&self.drop_result)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.record("ping".to_string());
        take(&self.ping_result)
    }

    async fn ping_session(&self) -> Result<(), DatabaseError> {
        self.record("ping_session".to_string());
        take(&self.ping_session_result)
    }

    fn pool_status(&self) -> PoolStatus {
        self.status
    }
}
