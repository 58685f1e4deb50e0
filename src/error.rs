// Error types for the Pokédex pipeline
// One load error kind: every fetch problem collapses into NetworkFailure

use thiserror::Error;

/// Message shown to the user whenever a load cycle fails.
pub const LOAD_FAILURE_MESSAGE: &str =
    "Could not reach the PokéAPI. Check your connection or try again later.";

/// Failure of a load cycle (index fetch or any detail fetch)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Transport rejection, non-success status, or undecodable body.
    /// The detail string is for logs only.
    #[error("network failure: {0}")]
    NetworkFailure(String),
}

impl LoadError {
    /// User-facing text; timeouts, DNS errors and 404s all read the same
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILURE_MESSAGE
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::NetworkFailure(err.to_string())
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_detail() {
        let err = LoadError::NetworkFailure("dns error: no such host".to_string());
        assert_eq!(err.user_message(), LOAD_FAILURE_MESSAGE);
        assert!(err.to_string().contains("dns error"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            key: "POKEDEX_LIMIT".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for POKEDEX_LIMIT: lots");
    }
}
