use std::io;
use thiserror::Error;

/// A single bad line in an rc file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error on line {line}: {source}")]
    Config {
        line: usize,
        #[source]
        source: ConfigError,
    },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Config {
            line: 3,
            source: ConfigError::InvalidValue {
                key: "charlimit".to_string(),
                value: "lots".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Config error on line 3: Invalid value for charlimit: lots");
        assert_eq!(
            ConfigError::UnknownSetting("nu".to_string()).to_string(),
            "Unknown setting: nu"
        );
    }
}
