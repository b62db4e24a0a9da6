// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout for the configuration file scholsync uses to simplify
//! the process of serialization and deserialization. File I/O is left to the
//! caller to figure out.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default Schol-AR service base URL.
pub const DEFAULT_SERVICE_URL: &str = "https://www.schol-ar.io";

/// Default ceiling for uploaded file size in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 30;

/// Settings file layout.
///
/// Scholsync reads an optional TOML settings file that controls which remote
/// service instance to talk to, and where cached remote state gets stored on
/// the local file system. A missing settings file simply means defaults all
/// the way down.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Remote service settings.
    #[serde(default)]
    pub service: ServiceSettings,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageSettings,
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut settings: Settings = toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on the data directory field.
        settings.storage.data_dir = match settings.storage.data_dir {
            Some(data_dir) => Some(DataDir::new(
                shellexpand::full(data_dir.to_string().as_str())
                    .map_err(ConfigError::ShellExpansion)?
                    .into_owned(),
            )),
            None => None,
        };

        Ok(settings)
    }
}

impl Display for Settings {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// Remote service configuration settings.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct ServiceSettings {
    /// Base URL of the Schol-AR service instance to talk to.
    #[serde(default = "default_service_url")]
    pub url: String,

    /// Largest file size the service accepts for upload, in megabytes.
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

/// Local storage configuration settings.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Override for the cache base directory.
    ///
    /// Defaults to `$XDG_DATA_HOME/scholsync` when left unset.
    pub data_dir: Option<DataDir>,
}

/// Path acting as the cache base directory.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct DataDir(PathBuf);

impl DataDir {
    /// Construct new data directory path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Treat data directory as [`Path`] slice.
    pub fn as_path(&self) -> &Path {
        self.0.as_path()
    }
}

impl Display for DataDir {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_path().to_string_lossy().as_ref())
    }
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_max_upload_mb() -> u64 {
    DEFAULT_MAX_UPLOAD_MB
}

/// Configuration error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
