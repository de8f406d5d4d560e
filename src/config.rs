// Copyright 2025 the Geoadmin Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration loaded from TOML.
//!
//! ```toml
//! base_url = "http://localhost:8080/gen/request"
//! current_user = "alice"
//! zoom = 10
//! center = { lat = 37.77, lng = -122.42 }
//! ```
//!
//! Every field is optional in the file. Command-line flags are applied on
//! top of whatever the file provides.

use crate::model::LatLng;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no current user configured (set current_user or pass --user)")]
    MissingUser,

    #[error("zoom {0} is deeper than the maximum of {max}", max = settings::map::MAX_ZOOM)]
    ZoomOutOfRange(u8),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint every request is sent to
    pub base_url: String,
    /// User id every ownership check compares against
    pub current_user: String,
    pub center: Option<LatLng>,
    pub zoom: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: settings::backend::DEFAULT_BASE_URL.to_string(),
            current_user: String::new(),
            center: None,
            zoom: None,
        }
    }
}

impl Config {
    /// `<config dir>/geoadmin/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| {
            base.join(settings::config::DIR_NAME)
                .join(settings::config::FILE_NAME)
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load an explicit path, or the default path when it exists
    ///
    /// An explicit path must exist. A missing default file yields the
    /// defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.current_user.trim().is_empty() {
            return Err(ConfigError::MissingUser);
        }
        if let Some(zoom) = self.zoom
            && zoom > settings::map::MAX_ZOOM
        {
            return Err(ConfigError::ZoomOutOfRange(zoom));
        }
        Ok(())
    }

    /// Initial map center
    pub fn center(&self) -> LatLng {
        self.center.unwrap_or(LatLng::new(
            settings::map::DEFAULT_CENTER_LAT,
            settings::map::DEFAULT_CENTER_LNG,
        ))
    }

    /// Initial zoom level
    pub fn zoom(&self) -> u8 {
        self.zoom.unwrap_or(settings::map::DEFAULT_ZOOM)
    }
}
