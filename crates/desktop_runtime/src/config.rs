//! Typed desktop configuration and its TOML loader.

use std::{
    fs,
    marker::PhantomData,
    path::PathBuf,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{geometry::GeometryConfig, model::AppId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid desktop config: {0}")]
    Invalid(String),
}

/// Window manager settings for one page session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub geometry: GeometryConfig,
    /// Open-window limit. `None` disables eviction.
    pub max_open_windows: Option<usize>,
    /// Window opened at boot.
    pub initial_window: AppId,
    /// Z-index of the boot window; later windows count up from here.
    pub initial_z_index: u32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            max_open_windows: Some(4),
            initial_window: AppId::Motd,
            initial_z_index: 10,
        }
    }
}

impl DesktopConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Rejects settings the window manager cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.geometry;
        if geometry.min_width <= 0 || geometry.min_height <= 0 {
            return Err(ConfigError::Invalid(
                "minimum window size must be positive".to_string(),
            ));
        }
        if geometry.min_maximized_height <= 0 {
            return Err(ConfigError::Invalid(
                "minimum maximized height must be positive".to_string(),
            ));
        }
        if self.max_open_windows == Some(0) {
            return Err(ConfigError::Invalid(
                "max_open_windows must be at least 1".to_string(),
            ));
        }
        if self.initial_z_index == u32::MAX {
            return Err(ConfigError::Invalid(
                "initial_z_index leaves no room for later windows".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generic TOML-backed config loader.
///
/// `ConfigLoader<T>` handles only filesystem access and deserialization. Callers still validate
/// the typed value after loading.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn load(&self) -> Result<T, ConfigError> {
        let body = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&body).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Loads and validates a [`DesktopConfig`] from `path`.
pub fn load_desktop_config(path: impl Into<PathBuf>) -> Result<DesktopConfig, ConfigError> {
    let config = ConfigLoader::<DesktopConfig>::new(path).load()?;
    config.validate()?;
    Ok(config)
}
