//! Process configuration, read once from the environment.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Variable naming the books table.
pub const TABLE_VAR: &str = "table";
/// Variable holding the log filter directive.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
/// Log filter used when [`LOG_LEVEL_VAR`] is unset.
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("environment variable `{0}` is not set")]
    Missing(&'static str),
    /// The log level is not a valid filter directive.
    #[error("invalid log level `{level}`: {reason}")]
    InvalidLogLevel {
        /// The rejected directive.
        level: String,
        /// Why the directive was rejected.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    Subscriber(String),
}

/// Handler configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Name of the DynamoDB table holding the books.
    pub table_name: String,
    /// `tracing` filter directive, e.g. `info` or `dynamodb_books=debug`.
    pub log_level: String,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let table_name = present(TABLE_VAR).ok_or(ConfigError::Missing(TABLE_VAR))?;
        let log_level = present(LOG_LEVEL_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        Ok(Self {
            table_name,
            log_level,
        })
    }

    fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(self.log_level.to_lowercase()).map_err(|error| {
            ConfigError::InvalidLogLevel {
                level: self.log_level.clone(),
                reason: error.to_string(),
            }
        })
    }
}

/// Install the global `tracing` subscriber filtered by the configured log level.
pub fn init_tracing(config: &Config) -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .try_init()
        .map_err(|error| ConfigError::Subscriber(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use std::collections;

    fn load(variables: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let variables: collections::HashMap<&str, &str> = variables.iter().copied().collect();
        Config::from_lookup(|name| variables.get(name).map(|value| value.to_string()))
    }

    #[rstest]
    #[case::defaults(
        &[("table", "BooksTable")],
        Config {
            table_name: "BooksTable".to_string(),
            log_level: "debug".to_string(),
        }
    )]
    #[case::explicit_log_level(
        &[("table", "BooksTable"), ("LOG_LEVEL", "INFO")],
        Config {
            table_name: "BooksTable".to_string(),
            log_level: "INFO".to_string(),
        }
    )]
    #[case::blank_log_level(
        &[("table", "BooksTable"), ("LOG_LEVEL", " ")],
        Config {
            table_name: "BooksTable".to_string(),
            log_level: "debug".to_string(),
        }
    )]
    fn test_from_lookup(#[case] variables: &[(&str, &str)], #[case] expected: Config) {
        let actual = load(variables).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::unset(&[])]
    #[case::empty(&[("table", "")])]
    fn test_missing_table(#[case] variables: &[(&str, &str)]) {
        let actual = load(variables).unwrap_err();
        assert!(matches!(actual, ConfigError::Missing("table")));
    }

    #[rstest]
    #[case::upper_case("DEBUG", true)]
    #[case::directive("dynamodb_books=info", true)]
    #[case::unknown_level("dynamodb_books=loud", false)]
    fn test_env_filter(#[case] log_level: &str, #[case] valid: bool) {
        let config = Config {
            table_name: "BooksTable".to_string(),
            log_level: log_level.to_string(),
        };
        assert_eq!(config.env_filter().is_ok(), valid);
    }
}
