//! Pool Domain Models
//!
//! Pooling policy tunables and live pool counters.

use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_POOL_SIZE: u32 = 20;
pub const DEFAULT_MAX_OVERFLOW: u32 = 10;
pub const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POOL_RECYCLE_SECS: u64 = 3600;

/// Connection pooling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPolicy {
    /// Connections kept persistently in the pool
    pub pool_size: u32,
    /// Extra connections allowed beyond `pool_size` under load
    pub max_overflow: u32,
    /// How long to wait for a free connection before failing
    pub timeout: Duration,
    /// Maximum age of a connection before it is recycled
    pub recycle: Duration,
}

impl PoolPolicy {
    /// Upper bound on simultaneously open connections
    #[must_use]
    pub fn max_connections(&self) -> u32 {
        self.pool_size.saturating_add(self.max_overflow)
    }
}

impl Default for PoolPolicy {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            max_overflow: DEFAULT_MAX_OVERFLOW,
            timeout: Duration::from_secs(DEFAULT_POOL_TIMEOUT_SECS),
            recycle: Duration::from_secs(DEFAULT_POOL_RECYCLE_SECS),
        }
    }
}

/// Snapshot of connection pool counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    pub pool_size: u32,
    pub checked_in: u32,
    pub checked_out: u32,
    pub overflow: u32,
    pub total_connection: u32,
}

impl PoolStatus {
    /// Build a snapshot from the configured size and the pool's live counters.
    ///
    /// `live` is every open connection (idle or in use), `idle` the ones
    /// currently sitting in the pool.
    #[must_use]
    pub fn from_counts(pool_size: u32, live: u32, idle: u32) -> Self {
        let idle = idle.min(live);
        let overflow = live.saturating_sub(pool_size);

        Self {
            pool_size,
            checked_in: idle,
            checked_out: live - idle,
            overflow,
            total_connection: pool_size + overflow,
        }
    }
}
