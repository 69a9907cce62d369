//! Sessions
//!
//! A `Session` is one unit of work: a pooled connection inside an open
//! transaction, begun on the first statement. Nothing is committed unless the caller asks for it; closing
//! or dropping a session rolls back whatever is pending and hands the
//! connection back to the pool.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sqlx::{PgConnection, Postgres, Sqlite, SqliteConnection, Transaction};

use super::handle::{DatabaseHandle, DatabasePool};
use crate::domain::models::backend::BackendKind;
use crate::shared::errors::DatabaseError;

/// Boxed future returned by closures passed to [`SessionFactory::with_session`]
pub type SessionFuture<'s, T> = Pin<Box<dyn Future<Output = T> + Send + 's>>;

/// Open transaction on a pooled connection
#[derive(Debug)]
pub enum SessionTransaction {
    Postgres(Transaction<'static, Postgres>),
    Sqlite(Transaction<'static, Sqlite>),
}

impl SessionTransaction {
    async fn commit(self) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(tx) => tx.commit().await,
            Self::Sqlite(tx) => tx.commit().await,
        }
    }

    async fn rollback(self) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(tx) => tx.rollback().await,
            Self::Sqlite(tx) => tx.rollback().await,
        }
    }
}

/// Decrements the factory's open-session count exactly once
#[derive(Debug)]
struct OpenSessionGuard {
    open: Arc<AtomicUsize>,
}

impl OpenSessionGuard {
    fn acquire(open: &Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self { open: Arc::clone(open) }
    }
}

impl Drop for OpenSessionGuard {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Unit of work bound to the process-wide handle.
///
/// After `commit` or `rollback` the session stays usable; the next statement
/// begins a new transaction.
#[derive(Debug)]
pub struct Session {
    backend: BackendKind,
    pool: DatabasePool,
    tx: Option<SessionTransaction>,
    _guard: OpenSessionGuard,
}

impl Session {
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Whether a transaction is currently open
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    async fn transaction(&mut self) -> Result<&mut SessionTransaction, DatabaseError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(self.tx.insert(tx))
    }

    /// Execute a statement inside the session's transaction
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the statement fails.
    pub async fn execute(&mut self, sql: &str) -> Result<u64, DatabaseError> {
        let rows = match self.transaction().await? {
            SessionTransaction::Postgres(tx) => sqlx::query(sql).execute(&mut **tx).await?.rows_affected(),
            SessionTransaction::Sqlite(tx) => sqlx::query(sql).execute(&mut **tx).await?.rows_affected(),
        };
        Ok(rows)
    }

    /// Run the liveness query
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the query fails.
    pub async fn ping(&mut self) -> Result<(), DatabaseError> {
        self.execute("SELECT 1").await.map(|_| ())
    }

    /// Postgres connection for typed queries
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::BackendMismatch` on a SQLite session.
    pub async fn postgres(&mut self) -> Result<&mut PgConnection, DatabaseError> {
        let actual = self.backend;
        match self.transaction().await? {
            SessionTransaction::Postgres(tx) => Ok(&mut **tx),
            SessionTransaction::Sqlite(_) => Err(DatabaseError::BackendMismatch {
                expected: BackendKind::Postgres,
                actual,
            }),
        }
    }

    /// SQLite connection for typed queries
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::BackendMismatch` on a Postgres session.
    pub async fn sqlite(&mut self) -> Result<&mut SqliteConnection, DatabaseError> {
        let actual = self.backend;
        match self.transaction().await? {
            SessionTransaction::Sqlite(tx) => Ok(&mut **tx),
            SessionTransaction::Postgres(_) => Err(DatabaseError::BackendMismatch {
                expected: BackendKind::Sqlite,
                actual,
            }),
        }
    }

    /// Commit the pending unit of work
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the commit fails.
    pub async fn commit(&mut self) -> Result<(), DatabaseError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    /// Discard the pending unit of work
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the rollback fails.
    pub async fn rollback(&mut self) -> Result<(), DatabaseError> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }

    /// Roll back anything uncommitted and release the session
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the rollback fails; the
    /// session is released either way.
    pub async fn close(mut self) -> Result<(), DatabaseError> {
        self.rollback().await
    }
}

/// Creates sessions bound to the process-wide handle
#[derive(Debug, Clone)]
pub struct SessionFactory {
    handle: Arc<DatabaseHandle>,
    open: Arc<AtomicUsize>,
}

impl SessionFactory {
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>) -> Self {
        Self {
            handle,
            open: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn handle(&self) -> &Arc<DatabaseHandle> {
        &self.handle
    }

    /// Number of sessions opened by this factory and not yet released
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Open a new session.
    ///
    /// No connection is taken from the pool until the first statement runs,
    /// so an idle session never holds the single SQLite connection.
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            backend: self.handle.backend(),
            pool: self.handle.pool().clone(),
            tx: None,
            _guard: OpenSessionGuard::acquire(&self.open),
        }
    }

    /// Run `f` with a fresh session and close it on every exit path.
    ///
    /// The session is closed after `f` resolves, whether it returned `Ok` or
    /// `Err`. If the future is dropped or panics, dropping the session
    /// releases it instead. Uncommitted work is rolled back.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns.
    pub async fn with_session<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: for<'s> FnOnce(&'s mut Session) -> SessionFuture<'s, Result<T, E>>,
    {
        let mut session = self.session();
        let result = f(&mut session).await;

        if let Err(err) = session.close().await {
            tracing::warn!(error = %err, "Failed to roll back session on close");
        }

        result
    }
}
