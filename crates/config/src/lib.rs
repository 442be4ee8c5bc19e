//! Environment-driven configuration for the taskboard gateway.
//!
//! All settings come from process environment variables (the binary loads
//! a `.env` file first, if one exists):
//!
//! - `DB_URI`     — MongoDB connection string (required)
//! - `DB_NAME`    — database name (default `taskboard`)
//! - `JWT_SECRET` — token signing secret (required)
//! - `BIND`       — listen address (default `127.0.0.1`)
//! - `PORT`       — listen port (default `8080`)

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Runtime configuration for the gateway process.
#[derive(Clone)]
pub struct Config {
    /// MongoDB connection string.
    pub db_uri: String,
    /// Database holding the `users`, `projects`, and `todos` collections.
    pub db_name: String,
    /// Server-held secret for signing and verifying session tokens.
    pub jwt_secret: String,
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::MissingVar(var));

        let port = match lookup("PORT") {
            None => 8080,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "PORT",
                value: raw,
            })?,
        };

        Ok(Self {
            db_uri: required("DB_URI")?,
            db_name: lookup("DB_NAME").unwrap_or_else(|| "taskboard".into()),
            jwt_secret: required("JWT_SECRET")?,
            bind: lookup("BIND").unwrap_or_else(|| "127.0.0.1".into()),
            port,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_uri", &self.db_uri)
            .field("db_name", &self.db_name)
            .field("jwt_secret", &"[REDACTED]")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .finish()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn full_environment() {
        let vars = env(&[
            ("DB_URI", "mongodb://localhost:27017"),
            ("DB_NAME", "tracker"),
            ("JWT_SECRET", "s3cret"),
            ("BIND", "0.0.0.0"),
            ("PORT", "9090"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.db_uri, "mongodb://localhost:27017");
        assert_eq!(config.db_name, "tracker");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn defaults_apply() {
        let vars = env(&[("DB_URI", "mongodb://db"), ("JWT_SECRET", "s")]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.db_name, "taskboard");
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_required_vars() {
        let vars = env(&[("JWT_SECRET", "s")]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DB_URI")));

        let vars = env(&[("DB_URI", "mongodb://db")]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("JWT_SECRET")));
    }

    #[test]
    fn invalid_port_rejected() {
        let vars = env(&[
            ("DB_URI", "mongodb://db"),
            ("JWT_SECRET", "s"),
            ("PORT", "not-a-port"),
        ]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "PORT", .. }));
    }

    #[test]
    fn debug_redacts_secret() {
        let vars = env(&[("DB_URI", "mongodb://db"), ("JWT_SECRET", "hunter2")]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
