use std::str::FromStr;

use anyhow::Context;
use axum::http::HeaderValue;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://arbor.db`).
    pub database_url: String,
    /// Pool size (default: `5`).
    pub database_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `DATABASE_URL`             | `sqlite://arbor.db`     |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin '{origin}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port: parse_var("PORT", &var("PORT", "3000"))?,
            database_url: var("DATABASE_URL", "sqlite://arbor.db"),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                &var("DATABASE_MAX_CONNECTIONS", "5"),
            )?,
            cors_origins,
            request_timeout_secs: parse_var(
                "REQUEST_TIMEOUT_SECS",
                &var("REQUEST_TIMEOUT_SECS", "30"),
            )?,
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite://arbor.db");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite://trees.db"),
            ("CORS_ORIGINS", "http://a.example, http://b.example,"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite://trees.db");
        assert_eq!(
            config.cors_origins,
            vec!["http://a.example", "http://b.example"]
        );
    }

    #[test]
    fn malformed_port_is_an_error() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().starts_with("PORT must be a valid"));
    }
}
