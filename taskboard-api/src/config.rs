//! Configuration management for the API server
//!
//! This module loads configuration from environment variables (and a `.env`
//! file when present) into a type-safe configuration struct.
//!
//! # Environment Variables
//!
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `API_PORT`: Port to bind to (default: 3000)
//! - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
//! - `PRODUCTION`: Enables HSTS (default: false)
//! - `STORE_BACKEND`: `postgres` or `memory` (default: postgres)
//! - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
//! - `DATABASE_MIN_CONNECTIONS`: Warm connections (default: 2)
//! - `DATABASE_CONNECT_TIMEOUT_SECONDS`: Connection acquire timeout (default: 30)
//! - `DATABASE_IDLE_TIMEOUT_SECONDS`: Close idle connections after this, 0 = never (default: 600)
//! - `DATABASE_MAX_LIFETIME_SECONDS`: Recycle connections after this, 0 = never (default: 1800)
//! - `RUST_LOG`: Log filter
//!
//! # Example
//!
//! ```no_run
//! use taskboard_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use std::{env, str::FromStr, time::Duration};
use taskboard_shared::db::pool::PoolConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Storage configuration
    pub store: StoreConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,
}

/// Which store implementation serves requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("unknown STORE_BACKEND '{}' (expected postgres or memory)", other),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// Pool settings, present when the backend is postgres
    pub database: Option<PoolConfig>,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing while the postgres backend is selected
    /// - A variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let api = ApiConfig {
            host: vars.get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: vars.parse("API_PORT", 3000u16)?,
            cors_origins: parse_origins(&vars.get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string())),
            production: vars.parse("PRODUCTION", false)?,
        };

        let backend = vars.parse("STORE_BACKEND", StoreBackend::Postgres)?;
        let database = match backend {
            StoreBackend::Memory => None,
            StoreBackend::Postgres => Some(pool_config(&vars)?),
        };

        Ok(Self {
            api,
            store: StoreConfig { backend, database },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn pool_config<F>(vars: &Vars<F>) -> anyhow::Result<PoolConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let url = vars
        .get("DATABASE_URL")
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
    let defaults = PoolConfig::new(url);

    let config = PoolConfig {
        max_connections: vars.parse("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
        min_connections: vars.parse("DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
        acquire_timeout: Duration::from_secs(
            vars.parse("DATABASE_CONNECT_TIMEOUT_SECONDS", defaults.acquire_timeout.as_secs())?,
        ),
        idle_timeout: vars.seconds_or_never("DATABASE_IDLE_TIMEOUT_SECONDS", defaults.idle_timeout)?,
        max_lifetime: vars.seconds_or_never("DATABASE_MAX_LIFETIME_SECONDS", defaults.max_lifetime)?,
        ..defaults
    };

    if config.min_connections > config.max_connections {
        anyhow::bail!(
            "DATABASE_MIN_CONNECTIONS ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
            config.min_connections,
            config.max_connections
        );
    }

    Ok(config)
}

/// Variable source with typed accessors
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }

    /// Reads `name`, falling back to `default` when unset
    fn parse<T>(&self, name: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("invalid value for {}: {}", name, e)),
            None => Ok(default),
        }
    }

    /// Reads a duration in seconds where `0` disables it
    fn seconds_or_never(
        &self,
        name: &str,
        default: Option<Duration>,
    ) -> anyhow::Result<Option<Duration>> {
        match self.get(name) {
            Some(_) => {
                let secs: u64 = self.parse(name, 0)?;
                Ok((secs > 0).then(|| Duration::from_secs(secs)))
            }
            None => Ok(default),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
