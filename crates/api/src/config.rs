use std::time::Duration;

use axum::http::HeaderValue;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except `api_token` have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer token every bookmark request must present.
    pub api_token: String,
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `API_TOKEN`            | **required**               |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid u16",
                value: raw,
            })?,
            None => 8000,
        };

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    expected: "a comma-separated list of origins",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs: u64 = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                expected: "a valid u64",
                value: raw,
            })?,
            None => 30,
        };

        let api_token = var("API_TOKEN").ok_or(ConfigError::Missing("API_TOKEN"))?;
        let database_url = var("DATABASE_URL");

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_token,
            database_url,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[("API_TOKEN", "secret")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.api_token, "secret");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn missing_or_blank_token_is_an_error() {
        assert_matches!(
            ServerConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("API_TOKEN"))
        );
        assert_matches!(
            ServerConfig::from_lookup(lookup(&[("API_TOKEN", "  ")])),
            Err(ConfigError::Missing("API_TOKEN"))
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("API_TOKEN", "t"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("DATABASE_URL", "postgres://localhost/bookmarks"),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/bookmarks")
        );
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("API_TOKEN", "t"), ("PORT", "eighty")]))
            .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { name: "PORT", .. });
        assert_eq!(err.to_string(), "PORT must be a valid u16, got 'eighty'");
    }
}
