use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::sim::WorldSettings;

pub(crate) const CONFIG_ENV_VAR: &str = "ATC_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config '{path}' at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config '{path}': {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Optional overrides for world generation. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub item_count: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let world = WorldSettings::default();
        Self {
            world_width: world.width,
            world_height: world.height,
            item_count: world.item_count,
            seed: world.seed,
        }
    }
}

impl GameConfig {
    /// Defaults unless `ATC_CONFIG` names a file.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        let config: GameConfig = serde_path_to_error::deserialize(&mut deserializer).map_err(
            |error| {
                let field = error.path().to_string();
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    field,
                    source: error.into_inner(),
                }
            },
        )?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        };
        for (name, value) in [("world_width", self.world_width), ("world_height", self.world_height)] {
            if !value.is_finite() || value < 400.0 {
                return Err(invalid(format!("{name} must be at least 400, got {value}")));
            }
        }
        Ok(())
    }

    pub(crate) fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            width: self.world_width,
            height: self.world_height,
            item_count: self.item_count,
            seed: self.seed,
        }
    }
}
