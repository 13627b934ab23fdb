//! Load configuration from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `SHOP_HOST` | `127.0.0.1` |
//! | `SHOP_PORT` | `3000` |
//! | `SHOP_STORE` | `postgres` (`memory` for a throwaway in-process store) |
//! | `DATABASE_URL` | `postgres://localhost/shop_db` |
//! | `SHOP_DB_SCHEMA` | `public` |
//! | `SHOP_DB_MAX_CONNECTIONS` | `5` |

use std::str::FromStr;

use crate::config::types::AppConfig;
use crate::error::ConfigError;

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        if let Some(host) = lookup("SHOP_HOST") {
            config.host = parse("SHOP_HOST", &host)?;
        }
        if let Some(port) = lookup("SHOP_PORT") {
            config.port = parse("SHOP_PORT", &port)?;
        }
        if let Some(store) = lookup("SHOP_STORE") {
            config.store = parse("SHOP_STORE", &store)?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            config.database_url = url;
        }
        if let Some(schema) = lookup("SHOP_DB_SCHEMA").filter(|s| !s.trim().is_empty()) {
            config.db_schema = schema;
        }
        if let Some(max) = lookup("SHOP_DB_MAX_CONNECTIONS") {
            config.db_max_connections = parse("SHOP_DB_MAX_CONNECTIONS", &max)?;
        }
        Ok(config)
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
        name,
        reason: e.to_string(),
    })
}
