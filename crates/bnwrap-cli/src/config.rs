//! CLI configuration

use std::path::{Path, PathBuf};

use bnwrap_core::CurveId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "BNWRAP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Curve used when `--curve` is not given
    pub curve: CurveId,

    /// Print decimal alongside hex output
    pub show_decimal: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            curve: CurveId::P256,
            show_decimal: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` if given, otherwise use defaults
    ///
    /// The environment is not consulted here; see [`path_from_env`].
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Config path named by `$BNWRAP_CONFIG`, if set
pub fn path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV).map(PathBuf::from)
}
