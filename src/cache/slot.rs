// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! File slot primitives.
//!
//! A __slot__ is a directory that conventionally holds at most one file: the
//! current target image, model, session snapshot, or QR image. Writers keep
//! that invariant by emptying the slot before putting a new file in, and
//! readers simply take the first file they find.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

/// Get the file currently occupying a slot directory.
///
/// Lists the directory, skips subdirectories and hidden dotfiles, and
/// returns the first regular file in whatever order the filesystem
/// enumerates entries. That order is not sorted and not guaranteed stable
/// across filesystems; callers rely on "a/the file in the slot", never on
/// "the most recent file". Returns [`None`] for an empty or unreadable
/// directory.
pub fn first_file(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        return Some(path);
    }

    None
}

/// Empty a slot directory without deleting the directory itself.
///
/// # Errors
///
/// - Return [`Error::ReadSlotDir`] if the directory cannot be listed.
/// - Return [`Error::RemoveEntry`] if an entry cannot be deleted.
pub fn empty_dir(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| Error::ReadSlotDir {
        source,
        dir: dir.to_path_buf(),
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        let removal = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removal.map_err(|source| Error::RemoveEntry { source, path })?;
    }

    Ok(())
}

/// Copy an outside file into a slot directory, keeping its filename.
///
/// Supports `~` in the source path. Does not empty the slot first; callers
/// that want the one-file invariant call [`empty_dir`] themselves before
/// copying.
///
/// # Errors
///
/// - Return [`Error::CopyIn`] if the copy fails or the source path has no
///   filename component.
pub fn copy_into(src: impl AsRef<Path>, dir: &Path) -> Result<PathBuf> {
    let src = PathBuf::from(shellexpand::tilde(&src.as_ref().to_string_lossy()).into_owned());
    let filename = src.file_name().ok_or_else(|| Error::CopyIn {
        source: io::Error::new(io::ErrorKind::InvalidInput, "source path has no filename"),
        src: src.clone(),
        dir: dir.to_path_buf(),
    })?;

    let dest = dir.join(filename);
    fs::copy(&src, &dest).map_err(|source| Error::CopyIn {
        source,
        src: src.clone(),
        dir: dir.to_path_buf(),
    })?;

    Ok(dest)
}

/// Check that a file exists and sits under a size ceiling in megabytes.
pub fn within_size_limit(path: &Path, limit_mb: u64) -> bool {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata.len() < limit_mb * 1024 * 1024,
        _ => false,
    }
}

/// All possible error types for slot manipulation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Slot directory cannot be listed.
    #[error("failed to list slot directory {}", dir.display())]
    ReadSlotDir {
        #[source]
        source: io::Error,
        dir: PathBuf,
    },

    /// Slot entry cannot be deleted.
    #[error("failed to remove {} from its slot", path.display())]
    RemoveEntry {
        #[source]
        source: io::Error,
        path: PathBuf,
    },

    /// Outside file cannot be copied into the slot.
    #[error("failed to copy {} into {}", src.display(), dir.display())]
    CopyIn {
        #[source]
        source: io::Error,
        src: PathBuf,
        dir: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_file_skips_dotfiles_and_directories() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("subdir"))?;
        fs::write(dir.path().join(".hidden"), b"x")?;
        fs::write(dir.path().join("model.glb"), b"x")?;

        let result = first_file(dir.path());
        assert_eq!(result, Some(dir.path().join("model.glb")));

        Ok(())
    }

    #[test]
    fn first_file_handles_empty_and_missing_dirs() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert_eq!(first_file(dir.path()), None);
        assert_eq!(first_file(&dir.path().join("nope")), None);

        Ok(())
    }

    #[test]
    fn empty_dir_leaves_the_directory_itself() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("a.png"), b"x")?;
        fs::write(dir.path().join("b.png"), b"x")?;

        empty_dir(dir.path())?;
        assert!(dir.path().is_dir());
        assert_eq!(fs::read_dir(dir.path())?.count(), 0);

        Ok(())
    }

    #[test]
    fn copy_into_keeps_the_filename() -> anyhow::Result<()> {
        let outside = tempfile::tempdir()?;
        let slot = tempfile::tempdir()?;
        let src = outside.path().join("session.cxs");
        fs::write(&src, b"snapshot")?;

        let dest = copy_into(&src, slot.path())?;
        assert_eq!(dest, slot.path().join("session.cxs"));
        assert_eq!(fs::read(dest)?, b"snapshot");

        Ok(())
    }

    #[test]
    fn size_limit_is_strict() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("small.bin");
        fs::write(&path, vec![0u8; 1024])?;

        assert!(within_size_limit(&path, 1));
        assert!(!within_size_limit(&dir.path().join("missing.bin"), 1));

        Ok(())
    }
}
