//! Connection Handle
//!
//! Builds the process-wide sqlx pool for the resolved backend and exposes
//! liveness and pool-status helpers on top of it.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions, PgSslMode};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Connection;

use super::session::SessionTransaction;
use crate::domain::models::backend::{BackendKind, ConnectionTarget};
use crate::domain::models::pool::{PoolPolicy, PoolStatus};
use crate::infrastructure::driven_adapters::config::DatabaseConfig;
use crate::shared::errors::DatabaseError;

/// Connect timeout applied to managed-cloud Postgres connections
pub const MANAGED_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const LIVENESS_QUERY: &str = "SELECT 1";

/// Connection settings derived from the backend kind and pool policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleSettings {
    pub max_connections: u32,
    /// `None` keeps the driver default
    pub acquire_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    /// Ping each connection before handing it out
    pub pre_ping: bool,
    pub require_tls: bool,
    /// Bounds only the throwaway connection opened by
    /// [`DatabaseHandle::ping`]. Pooled checkouts are bounded by
    /// `acquire_timeout`.
    pub connect_timeout: Option<Duration>,
}

impl HandleSettings {
    #[must_use]
    pub fn for_backend(backend: BackendKind, policy: &PoolPolicy) -> Self {
        match backend {
            BackendKind::ManagedPostgres => Self {
                require_tls: true,
                connect_timeout: Some(MANAGED_CONNECT_TIMEOUT),
                ..Self::pooled(policy)
            },
            BackendKind::Postgres => Self::pooled(policy),
            // One file-backed connection shared by every task; no recycling.
            BackendKind::Sqlite => Self {
                max_connections: 1,
                acquire_timeout: None,
                max_lifetime: None,
                pre_ping: false,
                require_tls: false,
                connect_timeout: None,
            },
        }
    }

    fn pooled(policy: &PoolPolicy) -> Self {
        Self {
            max_connections: policy.max_connections(),
            acquire_timeout: Some(policy.timeout),
            max_lifetime: Some(policy.recycle),
            pre_ping: true,
            require_tls: false,
            connect_timeout: None,
        }
    }
}

/// The sqlx pool behind the handle
#[derive(Debug, Clone)]
pub enum DatabasePool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DatabasePool {
    /// Execute a single statement on any pooled connection
    pub async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
        let result = match self {
            Self::Postgres(pool) => sqlx::query(sql).execute(pool).await?.rows_affected(),
            Self::Sqlite(pool) => sqlx::query(sql).execute(pool).await?.rows_affected(),
        };
        Ok(result)
    }

    pub(super) async fn begin(&self) -> Result<SessionTransaction, sqlx::Error> {
        let tx = match self {
            Self::Postgres(pool) => SessionTransaction::Postgres(pool.begin().await?),
            Self::Sqlite(pool) => SessionTransaction::Sqlite(pool.begin().await?),
        };
        Ok(tx)
    }
}

/// Process-wide connection handle.
///
/// Construction is lazy: no connection is opened until the first query, so
/// an unreachable server surfaces on first use rather than here.
#[derive(Debug)]
pub struct DatabaseHandle {
    target: ConnectionTarget,
    policy: PoolPolicy,
    settings: HandleSettings,
    pool: DatabasePool,
}

impl DatabaseHandle {
    /// Build the handle described by the database configuration
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the URL cannot be parsed or the
    /// policy allows no connections at all.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Self::from_parts(config.target(), config.pool_policy())
    }

    /// Build a handle from an already resolved target and policy
    ///
    /// # Errors
    ///
    /// Same as [`connect_lazy`](Self::connect_lazy).
    pub fn from_parts(target: ConnectionTarget, policy: PoolPolicy) -> Result<Self, DatabaseError> {
        let backend = target.backend();
        let settings = HandleSettings::for_backend(backend, &policy);

        match backend {
            BackendKind::ManagedPostgres => tracing::info!(
                backend = %backend,
                pool_size = policy.pool_size,
                max_overflow = policy.max_overflow,
                "Using Supabase PostgreSQL"
            ),
            BackendKind::Postgres => tracing::info!(
                backend = %backend,
                pool_size = policy.pool_size,
                max_overflow = policy.max_overflow,
                "Using PostgreSQL"
            ),
            BackendKind::Sqlite => {
                tracing::warn!(backend = %backend, "Using SQLite (not recommended for production)");
            }
        }

        let pool = build_pool(&target, &settings)?;

        Ok(Self {
            target,
            policy,
            settings,
            pool,
        })
    }

    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.target.backend()
    }

    #[must_use]
    pub fn settings(&self) -> &HandleSettings {
        &self.settings
    }

    #[must_use]
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Run the liveness query on a throwaway connection.
    ///
    /// Postgres opens a dedicated connection outside the pool, bounded by the
    /// connect timeout (managed) or the pool timeout. SQLite reuses its single
    /// pooled connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Timeout` if the connection is not established
    /// in time, or `DatabaseError::Connection` for any driver failure.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        match &self.pool {
            DatabasePool::Postgres(pool) => {
                let options = pool.connect_options();
                let limit = self.settings.connect_timeout.unwrap_or(self.policy.timeout);

                let mut conn = tokio::time::timeout(limit, PgConnection::connect_with(&*options))
                    .await
                    .map_err(|_| DatabaseError::Timeout(limit))??;
                sqlx::query(LIVENESS_QUERY).execute(&mut conn).await?;
                conn.close().await?;
            }
            DatabasePool::Sqlite(pool) => {
                sqlx::query(LIVENESS_QUERY).execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Live pool counters; all zero for the SQLite fallback
    #[must_use]
    pub fn pool_status(&self) -> PoolStatus {
        match &self.pool {
            DatabasePool::Postgres(pool) => PoolStatus::from_counts(
                self.policy.pool_size,
                pool.size(),
                u32::try_from(pool.num_idle()).unwrap_or(u32::MAX),
            ),
            DatabasePool::Sqlite(_) => PoolStatus::default(),
        }
    }
}

fn build_pool(target: &ConnectionTarget, settings: &HandleSettings) -> Result<DatabasePool, DatabaseError> {
    if settings.max_connections == 0 {
        return Err(sqlx::Error::Configuration(
            "pool_size + max_overflow must allow at least one connection".into(),
        )
        .into());
    }

    match target.backend() {
        BackendKind::ManagedPostgres | BackendKind::Postgres => {
            let mut options = PgConnectOptions::from_str(target.url())?;
            if settings.require_tls {
                options = options.ssl_mode(PgSslMode::Require);
            }

            let mut pool_options = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .max_lifetime(settings.max_lifetime)
                .test_before_acquire(settings.pre_ping);
            if let Some(timeout) = settings.acquire_timeout {
                pool_options = pool_options.acquire_timeout(timeout);
            }

            Ok(DatabasePool::Postgres(pool_options.connect_lazy_with(options)))
        }
        BackendKind::Sqlite => {
            let options = SqliteConnectOptions::from_str(target.url())?.create_if_missing(true);

            let pool = SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .idle_timeout(None::<Duration>)
                .max_lifetime(settings.max_lifetime)
                .test_before_acquire(settings.pre_ping)
                .connect_lazy_with(options);

            Ok(DatabasePool::Sqlite(pool))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PoolPolicy {
        PoolPolicy {
            pool_size: 4,
            max_overflow: 2,
            timeout: Duration::from_secs(5),
            recycle: Duration::from_secs(600),
        }
    }

    #[test]
    fn should_force_tls_and_connect_timeout_for_managed_postgres() {
        let settings = HandleSettings::for_backend(BackendKind::ManagedPostgres, &policy());

        assert!(settings.require_tls);
        assert!(settings.pre_ping);
        assert_eq!(settings.connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(settings.max_connections, 6);
        assert_eq!(settings.acquire_timeout, Some(Duration::from_secs(5)));
        assert_eq!(settings.max_lifetime, Some(Duration::from_secs(600)));
    }

    #[test]
    fn should_pool_plain_postgres_without_transport_overrides() {
        let settings = HandleSettings::for_backend(BackendKind::Postgres, &policy());

        assert!(!settings.require_tls);
        assert!(settings.pre_ping);
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.max_connections, 6);
        assert_eq!(settings.max_lifetime, Some(Duration::from_secs(600)));
    }

    #[test]
    fn should_use_single_unpinged_connection_for_sqlite() {
        let settings = HandleSettings::for_backend(BackendKind::Sqlite, &policy());

        assert_eq!(settings.max_connections, 1);
        assert!(!settings.pre_ping);
        assert!(!settings.require_tls);
        assert_eq!(settings.acquire_timeout, None);
        assert_eq!(settings.max_lifetime, None);
    }

    #[tokio::test]
    async fn should_build_handle_for_each_url_shape() {
        let cases = [
            ("postgresql://u:p@db.ref.supabase.co:5432/postgres", BackendKind::ManagedPostgres),
            ("postgresql://u:p@localhost:5432/churn", BackendKind::Postgres),
            ("sqlite::memory:", BackendKind::Sqlite),
        ];

        for (url, expected) in cases {
            let handle =
                DatabaseHandle::from_parts(ConnectionTarget::resolve(url, None), policy()).unwrap();

            assert_eq!(handle.backend(), expected, "{url}");
            assert_eq!(
                handle.settings(),
                &HandleSettings::for_backend(expected, &policy()),
                "{url}"
            );
        }
    }

    #[tokio::test]
    async fn should_require_tls_only_on_managed_postgres_pool() {
        let cases = [
            ("postgresql://u:p@db.ref.supabase.co:5432/postgres", true),
            ("postgresql://u:p@localhost:5432/churn", false),
        ];

        for (url, require_tls) in cases {
            let handle =
                DatabaseHandle::from_parts(ConnectionTarget::resolve(url, None), policy()).unwrap();
            let DatabasePool::Postgres(pool) = handle.pool() else {
                panic!("expected a Postgres pool for {url}");
            };

            let ssl_mode = pool.connect_options().get_ssl_mode();
            assert_eq!(matches!(ssl_mode, PgSslMode::Require), require_tls, "{url}");
        }
    }

    #[tokio::test]
    async fn should_reject_policy_without_connections() {
        let empty = PoolPolicy {
            pool_size: 0,
            max_overflow: 0,
            ..PoolPolicy::default()
        };

        let result = DatabaseHandle::from_parts(
            ConnectionTarget::resolve("postgresql://u:p@localhost/churn", None),
            empty,
        );

        assert!(matches!(
            result,
            Err(DatabaseError::Connection(sqlx::Error::Configuration(_)))
        ));
    }

    #[tokio::test]
    async fn should_report_zeroed_pool_status_for_sqlite() {
        let handle = DatabaseHandle::from_parts(
            ConnectionTarget::resolve("sqlite::memory:", None),
            PoolPolicy::default(),
        )
        .unwrap();

        handle.ping().await.unwrap();

        assert_eq!(handle.pool_status(), PoolStatus::default());
    }

    #[tokio::test]
    async fn should_report_configured_size_before_first_postgres_connection() {
        let handle = DatabaseHandle::from_parts(
            ConnectionTarget::resolve("postgresql://u:p@localhost/churn", None),
            policy(),
        )
        .unwrap();

        let status = handle.pool_status();

        assert_eq!(status.pool_size, 4);
        assert_eq!(status.checked_in + status.checked_out, 0);
        assert_eq!(status.total_connection, 4);
    }
}
