//! Server configuration, read from environment variables.
//!
//! - `PANTRYKEEP_PORT`: port to listen on (default 8080)
//! - `PANTRYKEEP_TOKEN_SECRET`: token signing secret, required
//! - `PANTRYKEEP_SEED_DEMO`: set to `1`/`true`/`yes` to seed demo data
//!
//! The token secret has no fallback: startup fails when it is unset so
//! a deployment can never silently run with a guessable signing key.

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PANTRYKEEP_TOKEN_SECRET must be set to a non-empty value")]
    MissingTokenSecret,
    #[error("invalid PANTRYKEEP_PORT value '{0}'")]
    InvalidPort(String),
}

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub token_secret: String,
    pub seed_demo: bool,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Lookup seam keeps tests off the process environment, which is
    // shared across concurrently running tests.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match get("PANTRYKEEP_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let token_secret = get("PANTRYKEEP_TOKEN_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingTokenSecret)?;

        let seed_demo = get("PANTRYKEEP_SEED_DEMO")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            port,
            token_secret,
            seed_demo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("PANTRYKEEP_TOKEN_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token_secret, "s3cret");
        assert!(!config.seed_demo);
    }

    #[test]
    fn test_missing_secret_fails() {
        let result = Config::from_lookup(lookup(&[("PANTRYKEEP_PORT", "9000")]));
        assert!(matches!(result, Err(ConfigError::MissingTokenSecret)));
    }

    #[test]
    fn test_blank_secret_fails() {
        let result = Config::from_lookup(lookup(&[("PANTRYKEEP_TOKEN_SECRET", "   ")]));
        assert!(matches!(result, Err(ConfigError::MissingTokenSecret)));
    }

    #[test]
    fn test_port_and_seed_flag() {
        let config = Config::from_lookup(lookup(&[
            ("PANTRYKEEP_TOKEN_SECRET", "s3cret"),
            ("PANTRYKEEP_PORT", "3000"),
            ("PANTRYKEEP_SEED_DEMO", "true"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert!(config.seed_demo);
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = Config::from_lookup(lookup(&[
            ("PANTRYKEEP_TOKEN_SECRET", "s3cret"),
            ("PANTRYKEEP_PORT", "not-a-port"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }
}
