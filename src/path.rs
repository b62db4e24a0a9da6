// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine relevent path information for the directories scholsync keeps
//! its cached remote state and configuration in.

use std::path::PathBuf;

/// Determine default absolute path to the local cache base directory.
///
/// Uses XDG Base Directory path `$XDG_DATA_HOME/scholsync` as the default
/// absolute path for the cache. Does not check if the path returned actually
/// exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
///
/// # See Also
///
/// - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)
pub fn default_cache_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|path| path.join("scholsync"))
        .ok_or(NoWayHome)
}

/// Determine default absolute path to the scholsync configuration file.
///
/// Uses XDG Base Directory path `$XDG_CONFIG_HOME/scholsync/config.toml`.
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn default_config_file() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("scholsync").join("config.toml"))
        .ok_or(NoWayHome)
}

/// No way to determine user's home directory.
///
/// # See Also
///
/// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's home directory")]
pub struct NoWayHome;

/// Friendly result alias :3
pub type Result<T, E = NoWayHome> = std::result::Result<T, E>;
