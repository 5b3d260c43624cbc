use std::fmt;

use sqlx::postgres::PgConnectOptions;

/// Session secret used when `SESSION_SECRET` is unset. Only suitable for
/// local development; startup logs a warning when it is in effect.
pub const DEV_SESSION_SECRET: &str = "dev-only-session-secret";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Key for signing flash cookies.
    pub session_secret: String,
    pub database: DatabaseConfig,
}

/// Database connection settings.
///
/// `DATABASE_URL` wins when present; otherwise the individual `DB_*`
/// variables are combined.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SESSION_SECRET`       | [`DEV_SESSION_SECRET`]     |
    /// | `DATABASE_URL`         | unset                      |
    /// | `DB_HOST`              | `127.0.0.1`                |
    /// | `DB_PORT`              | `5432`                     |
    /// | `DB_USER`              | `todo_user`                |
    /// | `DB_PASS`              | `mypassword`               |
    /// | `DB_NAME`              | `todo`                     |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Panics on unparseable numeric values so misconfiguration fails fast
    /// at startup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let port: u16 = get("PORT", "5000")
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = get("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_secret = var("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEV_SESSION_SECRET.to_string());

        let database = DatabaseConfig {
            url: var("DATABASE_URL").filter(|s| !s.is_empty()),
            host: get("DB_HOST", "127.0.0.1"),
            port: get("DB_PORT", "5432")
                .parse()
                .expect("DB_PORT must be a valid u16"),
            user: get("DB_USER", "todo_user"),
            password: get("DB_PASS", "mypassword"),
            name: get("DB_NAME", "todo"),
            max_connections: get("DB_MAX_CONNECTIONS", "10")
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a valid u32"),
        };

        Self {
            host: get("HOST", "0.0.0.0"),
            port,
            request_timeout_secs,
            session_secret,
            database,
        }
    }

    /// Whether the built-in development secret is being used.
    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}

impl DatabaseConfig {
    /// Connection options for the pool.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse(),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)),
        }
    }
}

// Secrets are kept out of log output.

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("session_secret", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
