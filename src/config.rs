use std::{fmt, fs, io, path::Path};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MENU_PREFIX: &str = "menu";
pub const DEFAULT_OVERLAY_PREFIX: &str = "overlay";

/// Per-root discovery settings.
///
/// With `runtime_tagging` off (the default) a root only tracks the panels it
/// was given explicitly; large trees skip the discovery walk entirely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuRootConfig {
    pub runtime_tagging: bool,
    pub menu_prefix: String,
    pub overlay_prefix: String,
}

impl Default for MenuRootConfig {
    fn default() -> Self {
        Self {
            runtime_tagging: false,
            menu_prefix: DEFAULT_MENU_PREFIX.to_owned(),
            overlay_prefix: DEFAULT_OVERLAY_PREFIX.to_owned(),
        }
    }
}

impl MenuRootConfig {
    pub fn tagging() -> Self {
        Self {
            runtime_tagging: true,
            ..default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(config) => config,
            Err(error) => {
                warn!(
                    "failed to load menu root config from {}: {error}; using defaults",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "could not read config: {error}"),
            Self::Parse(error) => write!(f, "invalid config json: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Parse(error) => Some(error),
        }
    }
}
