//! Application configuration loaded from environment variables.
//!
//! Supports `.env` files for development and plain environment variables for
//! production. Precedence: env vars > .env file > defaults.
//!
//! Database settings are all optional. Anything left unset is resolved by the
//! Postgres client itself (libpq-style `PG*` variables, then built-in
//! defaults), so a half-configured environment still produces a pool and the
//! failure, if any, shows up on first connect.

use serde::Deserialize;

/// Listen port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Load the application configuration from the process environment.
///
/// Should be called once at startup; the result is passed down explicitly.
pub fn load() -> Result<AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    from_environment(config::Environment::default())
}

/// Build the configuration from an explicit environment source.
///
/// Keys are matched case-insensitively (`DB_HOST` → `db_host`). Values are
/// kept as strings and only converted where the target field is numeric, so a
/// password like `0123` survives untouched. Empty values count as unset, so
/// `PORT=` still falls back to the default.
pub fn from_environment(env: config::Environment) -> Result<AppConfig, config::ConfigError> {
    let cfg = config::Config::builder()
        .set_default("port", DEFAULT_PORT)?
        .add_source(env.ignore_empty(true))
        .build()?;

    let raw: RawEnv = cfg.try_deserialize()?;
    Ok(raw.into())
}

/// Flat view of the environment, one field per variable.
#[derive(Debug, Deserialize)]
struct RawEnv {
    db_host: Option<String>,
    db_port: Option<u16>,
    db_user: Option<String>,
    db_password: Option<String>,
    db_name: Option<String>,
    port: u16,
}

impl From<RawEnv> for AppConfig {
    fn from(raw: RawEnv) -> Self {
        Self {
            server: ServerConfig { port: raw.port },
            database: DatabaseConfig {
                host: raw.db_host,
                port: raw.db_port,
                user: raw.db_user,
                password: raw.db_password,
                name: raw.db_name,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port (`PORT`, default 3000).
    pub port: u16,
}

/// PostgreSQL connection parameters. `None` means "use the client default".
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Database name (`DB_NAME`)
    pub name: Option<String>,
}

// Hand-written so the password never ends up in logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .finish()
    }
}
