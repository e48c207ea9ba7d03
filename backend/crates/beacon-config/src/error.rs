use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    /// A value that parsed fine but is out of range for its field
    #[error("Invalid {field}: {message} {location}")]
    Invalid {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Config directory unavailable: {message} {location}")]
    ConfigDir {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config_dir<S: Into<String>>(message: S) -> Self {
        Self::ConfigDir {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Dotted name of the rejected setting, e.g. `ticker.interval_ms`
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
