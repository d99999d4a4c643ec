//! Configuration loading from disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
///
/// `path` is set whenever the config came from a file.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        errors: Vec<ValidationError>,
    },
}

impl ConfigError {
    /// The file the config was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } => Some(path),
            ConfigError::Parse { path, .. } | ConfigError::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Dotted names of the fields that failed validation, in report order.
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            ConfigError::Validation { errors, .. } => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    fn at(self, file: &Path) -> Self {
        match self {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(file.to_path_buf()),
                source,
            },
            ConfigError::Validation { errors, .. } => ConfigError::Validation {
                path: Some(file.to_path_buf()),
                errors,
            },
            io => io,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.path() {
            write!(f, "{}: ", path.display())?;
        }
        match self {
            ConfigError::Io { source, .. } => write!(f, "IO error: {}", source),
            ConfigError::Parse { source, .. } => write!(f, "Parse error: {}", source),
            ConfigError::Validation { errors, .. } => {
                write!(f, "Validation failed with {} error(s): ", errors.len())?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Validation { .. } => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|e| e.at(path))
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<BridgeConfig, ConfigError> {
    let config: BridgeConfig =
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })?;

    validate_config(&config).map_err(|errors| ConfigError::Validation { path: None, errors })?;

    Ok(config)
}
