//! Application Configuration
//!
//! Loads configuration from files and environment variables.
//!
//! Precedence, lowest to highest: built-in defaults, `config/default`,
//! `config/{RUN_MODE}`, `APP__SECTION__KEY` variables, and finally the plain
//! deployment variables (`DATABASE_URL`, `DB_POOL_SIZE`, ...).

use std::collections::HashMap;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::models::backend::{BackendKind, ConnectionTarget};
use crate::domain::models::pool::{
    PoolPolicy, DEFAULT_MAX_OVERFLOW, DEFAULT_POOL_RECYCLE_SECS, DEFAULT_POOL_SIZE,
    DEFAULT_POOL_TIMEOUT_SECS,
};

/// Local file-backed fallback used when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite://churn_api.db";

/// Plain environment variables and the config keys they override
const ENV_OVERRIDES: [(&str, &str); 9] = [
    ("DATABASE_URL", "database.url"),
    ("DATABASE_BACKEND", "database.backend"),
    ("DB_POOL_SIZE", "database.pool_size"),
    ("DB_MAX_OVERFLOW", "database.max_overflow"),
    ("DB_POOL_TIMEOUT", "database.pool_timeout_secs"),
    ("DB_POOL_RECYCLE", "database.pool_recycle_secs"),
    ("RESET_DB", "database.reset_on_startup"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
];

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    /// Explicit backend; inferred from `url` when absent
    pub backend: Option<BackendKind>,
    pub pool_size: u32,
    pub max_overflow: u32,
    pub pool_timeout_secs: u64,
    pub pool_recycle_secs: u64,
    /// Drop and recreate all tables at startup
    pub reset_on_startup: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            backend: None,
            pool_size: DEFAULT_POOL_SIZE,
            max_overflow: DEFAULT_MAX_OVERFLOW,
            pool_timeout_secs: DEFAULT_POOL_TIMEOUT_SECS,
            pool_recycle_secs: DEFAULT_POOL_RECYCLE_SECS,
            reset_on_startup: false,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn target(&self) -> ConnectionTarget {
        ConnectionTarget::resolve(self.url.clone(), self.backend)
    }

    #[must_use]
    pub fn pool_policy(&self) -> PoolPolicy {
        PoolPolicy {
            pool_size: self.pool_size,
            max_overflow: self.max_overflow,
            timeout: Duration::from_secs(self.pool_timeout_secs),
            recycle: Duration::from_secs(self.pool_recycle_secs),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    /// Load configuration from files and the given environment snapshot
    pub fn from_env_map(env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let run_mode = env.get("RUN_MODE").cloned().unwrap_or_else(|| "default".into());

        let mut builder = Config::builder()
            // Optional config files; serde defaults cover anything they omit
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Nested overrides (e.g., APP__DATABASE__POOL_SIZE)
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .source(Some(env.clone())),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, env.get(var).cloned())?;
        }

        builder.build()?.try_deserialize()
    }
}
