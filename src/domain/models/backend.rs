//! Backend Domain Model
//!
//! Identifies which database backend a connection target points at.

use std::fmt;

use serde::Deserialize;

/// Substring identifying a managed-cloud (Supabase) Postgres host.
///
/// Also matches the `pooler.supabase.com` connection pooler host.
pub const MANAGED_POSTGRES_MARKER: &str = "supabase";

/// URL schemes accepted for Postgres targets
const POSTGRES_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// Database backend selected for the connection handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Managed-cloud Postgres: pooled, TLS required, fixed connect timeout
    #[serde(alias = "supabase")]
    ManagedPostgres,
    /// Plain Postgres: pooled with the configured policy
    #[serde(alias = "postgresql")]
    Postgres,
    /// Local file-backed SQLite fallback: a single shared connection
    Sqlite,
}

impl BackendKind {
    /// Infer the backend from the shape of a connection URL.
    ///
    /// The managed marker is checked before the Postgres scheme, so a
    /// Supabase URL always resolves to `ManagedPostgres`.
    #[must_use]
    pub fn infer(url: &str) -> Self {
        if url.contains(MANAGED_POSTGRES_MARKER) {
            Self::ManagedPostgres
        } else if POSTGRES_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
            Self::Postgres
        } else {
            Self::Sqlite
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManagedPostgres => "managed_postgres",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection URL together with the backend it resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    url: String,
    backend: BackendKind,
}

impl ConnectionTarget {
    /// Resolve a target, preferring an explicitly configured backend over
    /// inference from the URL.
    #[must_use]
    pub fn resolve(url: impl Into<String>, explicit: Option<BackendKind>) -> Self {
        let url = url.into();
        let backend = explicit.unwrap_or_else(|| BackendKind::infer(&url));
        Self { url, backend }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_infer_managed_postgres_from_supabase_host() {
        let urls = [
            "postgresql://postgres:pw@db.abcd.supabase.co:5432/postgres",
            "postgres://user.ref:pw@aws-0-eu-central-1.pooler.supabase.com:6543/postgres",
        ];

        for url in urls {
            assert_eq!(BackendKind::infer(url), BackendKind::ManagedPostgres, "{url}");
        }
    }

    #[test]
    fn should_infer_postgres_from_scheme() {
        assert_eq!(
            BackendKind::infer("postgresql://app:pw@localhost:5432/churn"),
            BackendKind::Postgres
        );
        assert_eq!(
            BackendKind::infer("postgres://app:pw@db.internal/churn"),
            BackendKind::Postgres
        );
    }

    #[test]
    fn should_fall_back_to_sqlite_for_other_urls() {
        for url in ["sqlite://churn_api.db", "sqlite::memory:", "mysql://localhost/db", ""] {
            assert_eq!(BackendKind::infer(url), BackendKind::Sqlite, "{url}");
        }
    }

    #[test]
    fn should_prefer_explicit_backend_over_inference() {
        let target = ConnectionTarget::resolve(
            "postgresql://app:pw@db.example.supabase.co/postgres",
            Some(BackendKind::Postgres),
        );

        assert_eq!(target.backend(), BackendKind::Postgres);
    }
}
