//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// No file at the given or expected location.
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Not TOML, or a key holds a value of the wrong kind.
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// Parsed, but a value is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ConfigError::NotFound(PathBuf::from("/srv/nixpkgs/whatchanged.toml"));
        assert_eq!(
            err.to_string(),
            "configuration file not found: /srv/nixpkgs/whatchanged.toml"
        );
    }

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid("server.timeout_secs must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: server.timeout_secs must be positive"
        );
    }
}
