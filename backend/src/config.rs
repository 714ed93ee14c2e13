//! Database settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

/// Errors raised while turning settings into a pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No database URL was configured.
    #[error("database URL is not configured; set BLOGICUM_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Connection settings for the content database.
///
/// Values are layered from configuration files, `BLOGICUM_*` environment
/// variables and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOGICUM")]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Idle connections kept open.
    #[ortho_config(default = 2)]
    pub pool_min_idle: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub connection_timeout_secs: u64,
}

impl DatabaseSettings {
    /// Configured checkout timeout.
    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Build a pool configuration, preferring the configured URL over
    /// `fallback_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when neither is set.
    pub fn pool_config(&self, fallback_url: Option<String>) -> Result<PoolConfig, ConfigError> {
        let url = self
            .database_url
            .clone()
            .or(fallback_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        Ok(PoolConfig::new(url)
            .with_max_size(self.pool_max_size)
            .with_min_idle(Some(self.pool_min_idle))
            .with_connection_timeout(self.connection_timeout()))
    }
}
