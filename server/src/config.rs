//! Server configuration loaded from environment variables.
//!
//! DESIGN
//! ======
//! Every loader takes a `lookup` closure instead of reading `std::env`
//! directly, so tests can feed a map without racing on process globals.
//! `from_env` wires the closure to the real environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_IDENTITY_PROVIDER_LOGIN_URL: &str = "/auth/kakao";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} required")]
    Missing(&'static str),
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Parse a human-friendly boolean (`1/true/yes/on`, `0/false/no/off`).
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn required<L>(lookup: &L, key: &'static str) -> Result<String, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parsed<L, T>(lookup: &L, key: &'static str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

/// Runtime settings for the HTTP server and auth layer.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    /// HMAC key for access tokens.
    pub jwt_secret: String,
    pub token_ttl: Duration,
    /// SPA origin: CORS allow-list entry and post-OAuth redirect target.
    pub frontend_url: String,
    pub cookie_secure: bool,
    pub db_max_connections: u32,
    /// Where the login form's Kakao button sends the browser.
    pub identity_provider_login_url: String,
}

impl ServerConfig {
    /// Load from the process environment.
    ///
    /// - `DATABASE_URL`, `JWT_SECRET`: required
    /// - `PORT` (8000), `JWT_TTL_MINUTES` (60), `DB_MAX_CONNECTIONS` (5)
    /// - `FRONTEND_URL` (`http://localhost:3000`)
    /// - `COOKIE_SECURE`: defaults to whether `FRONTEND_URL` is https
    /// - `IDENTITY_PROVIDER_LOGIN_URL` (`/auth/kakao`)
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let jwt_secret = required(&lookup, "JWT_SECRET")?;
        let port = parsed(&lookup, "PORT", DEFAULT_PORT)?;
        let ttl_minutes = parsed(&lookup, "JWT_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        if ttl_minutes <= 0 {
            return Err(ConfigError::Invalid { key: "JWT_TTL_MINUTES", value: ttl_minutes.to_string() });
        }
        let db_max_connections = parsed(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let frontend_url = lookup("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_owned());
        let frontend_url = frontend_url.trim_end_matches('/').to_owned();

        let cookie_secure = match lookup("COOKIE_SECURE") {
            None => frontend_url.starts_with("https://"),
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
        };

        let identity_provider_login_url = lookup("IDENTITY_PROVIDER_LOGIN_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IDENTITY_PROVIDER_LOGIN_URL.to_owned());

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            token_ttl: Duration::minutes(ttl_minutes),
            frontend_url,
            cookie_secure,
            db_max_connections,
            identity_provider_login_url,
        })
    }
}
