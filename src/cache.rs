// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Local cache management and manipulation.
//!
//! Scholsync mirrors a slice of the remote service's state into one place
//! called the __cache__. The cache is a plain directory tree with JSON index
//! files, where every directory name is a stable server-assigned identifier
//! rather than a mutable human title:
//!
//! ```text
//! <base>/
//!   users_info.json                     username -> api_token
//!   <username>/
//!     projects_info.json                project records, stored verbatim
//!     <qr_string>/
//!       augmentations_info.json         augmentation records, verbatim
//!       <internal_augid>/
//!         target_image/                 slot: printed image the AR viewer tracks
//!         augmented_file/               slot: 3D asset shown over the image
//!         cxs/                          slot: session snapshot
//!       qr/
//!         pub/                          slot: public QR image
//!         admin/                        slot: admin QR image
//!     ...
//! ```
//!
//! The remote service is the source of truth. Index files are always
//! replaced wholesale with a freshly fetched listing, never merged, and
//! [`CacheStore::clean_local`] prunes local directories whose identifiers
//! the remote no longer reports. Local state is disposable; anything pruned
//! can be downloaded again.
//!
//! Every directory accessor creates the directory it resolves (idempotent),
//! so the same accessor serves both "give me a path to write into" and
//! "give me a path that should already contain files".

pub mod slot;
pub mod token;

use crate::{
    cache::token::TokenCache,
    record::{AugRecord, ProjectKind, ProjectRecord},
    remote::{Download, RemoteClient, RemoteError, UploadField},
};

use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

const USERS_INFO_FILE: &str = "users_info.json";
const PROJECTS_INFO_FILE: &str = "projects_info.json";
const AUGMENTATIONS_INFO_FILE: &str = "augmentations_info.json";

const TARGET_IMAGE_DIR: &str = "target_image";
const MODEL_DIR: &str = "augmented_file";
const SESSION_DIR: &str = "cxs";
const QR_DIR: &str = "qr";
const QR_PUB_DIR: &str = "pub";
const QR_ADMIN_DIR: &str = "admin";

/// Manager for the on-disk cache of remote Schol-AR state.
///
/// Owns the cache base directory, the remote client used to refresh stale
/// state, and a single-slot credential cache. One instance per process; the
/// cache is not safe against concurrent access from multiple processes.
#[derive(Debug)]
pub struct CacheStore {
    base: PathBuf,
    remote: RemoteClient,
    tokens: TokenCache,
}

impl CacheStore {
    /// Construct new cache store rooted at a base directory.
    pub fn new(base: impl Into<PathBuf>, remote: RemoteClient) -> Self {
        Self {
            base: base.into(),
            remote,
            tokens: TokenCache::new(),
        }
    }

    /// Initialize the base directory and an empty users index if missing.
    pub fn init_dirs(&self) -> Result<()> {
        let users_path = self.users_path();
        if users_path.exists() {
            return Ok(());
        }

        fs::create_dir_all(&self.base).map_err(io_error(&self.base))?;
        write_json(&users_path, &BTreeMap::<String, String>::new())
    }

    /// Check an API token against the remote service.
    pub fn validate_token(&self, token: &str) -> Result<bool> {
        Ok(self.remote.validate_token(token)?)
    }

    // ------------------------------------------------------------------
    // Users.

    /// Read the users index as a username to token mapping.
    ///
    /// A missing index file reads as an empty mapping.
    pub fn users_info(&self) -> Result<BTreeMap<String, String>> {
        Ok(read_json(&self.users_path())?.unwrap_or_default())
    }

    /// Check if a username exists in the users index.
    pub fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.users_info()?.contains_key(username))
    }

    /// All usernames known to the local cache.
    pub fn list_usernames(&self) -> Result<Vec<String>> {
        Ok(self.users_info()?.into_keys().collect())
    }

    /// Save or update a username to API token pairing.
    ///
    /// Both values must be validated before they get here. Creates the
    /// user's directory and refreshes the credential cache.
    pub fn store_user(&mut self, username: &str, api_token: &str) -> Result<()> {
        let mut users = self.users_info()?;
        users.insert(username.to_string(), api_token.to_string());
        write_json(&self.users_path(), &users)?;

        let user_dir = self.user_dir_name(username);
        fs::create_dir_all(&user_dir).map_err(io_error(&user_dir))?;

        self.tokens.store(username, api_token);

        Ok(())
    }

    /// Get the API token stored for a username.
    ///
    /// Hits the credential cache only on an exact username match; any other
    /// username re-reads the users index so a user switch can never observe
    /// a stale token.
    ///
    /// # Errors
    ///
    /// - Return [`CacheError::UnknownUser`] if the username is not indexed.
    pub fn user_token(&self, username: &str) -> Result<String> {
        if let Some(token) = self.tokens.lookup(username) {
            return Ok(token.to_string());
        }

        self.users_info()?
            .remove(username)
            .ok_or_else(|| CacheError::UnknownUser(username.to_string()))
    }

    /// Remove a user from the index and delete the user's entire subtree.
    ///
    /// # Errors
    ///
    /// - Return [`CacheError::UnknownUser`] if the username is not indexed.
    #[instrument(skip(self), level = "debug")]
    pub fn remove_user(&mut self, username: &str) -> Result<()> {
        let mut users = self.users_info()?;
        if users.remove(username).is_none() {
            return Err(CacheError::UnknownUser(username.to_string()));
        }

        let user_dir = self.user_dir_name(username);
        if user_dir.is_dir() {
            fs::remove_dir_all(&user_dir).map_err(io_error(&user_dir))?;
        }

        write_json(&self.users_path(), &users)?;

        if self.tokens.lookup(username).is_some() {
            self.tokens.invalidate();
        }

        info!("removed user {username} and all cached data");

        Ok(())
    }

    // ------------------------------------------------------------------
    // Projects.

    /// Read the cached project records for a user.
    ///
    /// A missing index file reads as no projects.
    pub fn projects(&self, username: &str) -> Result<Vec<ProjectRecord>> {
        Ok(read_json(&self.projects_path(username))?.unwrap_or_default())
    }

    /// Check if a project title exists in the user's project index.
    pub fn project_exists(&self, username: &str, project_title: &str) -> Result<bool> {
        Ok(self
            .projects(username)?
            .iter()
            .any(|project| project.title == project_title))
    }

    /// All project titles in the user's project index.
    pub fn list_project_titles(&self, username: &str) -> Result<Vec<String>> {
        Ok(self
            .projects(username)?
            .into_iter()
            .map(|project| project.title)
            .collect())
    }

    /// Look up a project record by title.
    ///
    /// # Errors
    ///
    /// - Return [`CacheError::UnknownProject`] if the title is not indexed.
    pub fn find_project(&self, username: &str, project_title: &str) -> Result<ProjectRecord> {
        self.projects(username)?
            .into_iter()
            .find(|project| project.title == project_title)
            .ok_or_else(|| CacheError::UnknownProject(project_title.to_string()))
    }

    /// Replace the user's project index with a fresh remote listing.
    ///
    /// The index file is rewritten only after the response parsed in full,
    /// so a failed call leaves the previous index untouched.
    #[instrument(skip(self), level = "debug")]
    pub fn refresh_projects(&self, username: &str) -> Result<()> {
        let token = self.user_token(username)?;
        let listing = self.remote.list_projects(&token)?;

        let user_dir = self.user_dir_name(username);
        fs::create_dir_all(&user_dir).map_err(io_error(&user_dir))?;
        write_json(&self.projects_path(username), &listing)
    }

    /// Create a project on the service and index it locally.
    ///
    /// Refreshes the project index from remote after creation, so the new
    /// record lands in the index in the exact shape the service reports.
    pub fn create_project(
        &self,
        username: &str,
        title: &str,
        kind: ProjectKind,
        disc_url: &str,
    ) -> Result<ProjectRecord> {
        let token = self.user_token(username)?;
        self.remote.create_project(&token, title, kind, disc_url)?;
        self.refresh_projects(username)?;

        self.find_project(username, title)
    }

    // ------------------------------------------------------------------
    // Augmentations.

    /// Read the cached augmentation records for a project.
    ///
    /// A missing index file reads as no augmentations.
    pub fn augmentations(&self, username: &str, project_title: &str) -> Result<Vec<AugRecord>> {
        let project_dir = self.project_dir_name(username, project_title)?;
        Ok(read_json(&project_dir.join(AUGMENTATIONS_INFO_FILE))?.unwrap_or_default())
    }

    /// Check if an augmentation title exists in the project's index.
    pub fn aug_exists(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<bool> {
        Ok(self
            .augmentations(username, project_title)?
            .iter()
            .any(|aug| aug.title == augmentation_title))
    }

    /// All augmentation titles in the project's index.
    pub fn list_augmentation_titles(
        &self,
        username: &str,
        project_title: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .augmentations(username, project_title)?
            .into_iter()
            .map(|aug| aug.title)
            .collect())
    }

    /// Look up an augmentation record by title.
    ///
    /// # Errors
    ///
    /// - Return [`CacheError::UnknownAugmentation`] if the title is not
    ///   indexed.
    pub fn find_augmentation(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<AugRecord> {
        self.augmentations(username, project_title)?
            .into_iter()
            .find(|aug| aug.title == augmentation_title)
            .ok_or_else(|| CacheError::UnknownAugmentation(augmentation_title.to_string()))
    }

    /// Replace the project's augmentation index with a fresh remote listing.
    #[instrument(skip(self), level = "debug")]
    pub fn refresh_augmentations(&self, username: &str, project_title: &str) -> Result<()> {
        let token = self.user_token(username)?;
        let qr_string = self.find_project(username, project_title)?.qr_string;
        let listing = self.remote.list_augmentations(&token, &qr_string)?;

        let project_dir = self.project_dir(username, project_title)?;
        write_json(&project_dir.join(AUGMENTATIONS_INFO_FILE), &listing)
    }

    /// Create an augmentation on the service, index it, build its slot dirs.
    pub fn create_augmentation(
        &self,
        username: &str,
        project_title: &str,
        title: &str,
        kind: &str,
    ) -> Result<AugRecord> {
        let token = self.user_token(username)?;
        let qr_string = self.find_project(username, project_title)?.qr_string;
        self.remote
            .create_augmentation(&token, &qr_string, title, kind)?;
        self.refresh_augmentations(username, project_title)?;

        let record = self.find_augmentation(username, project_title, title)?;
        self.init_aug_dirs(username, project_title, title)?;

        Ok(record)
    }

    // ------------------------------------------------------------------
    // Path derivation.
    //
    // Paths are a pure function of the server-assigned identifiers held in
    // the index files. A lookup that is not indexed yet fails instead of
    // guessing a path from the human title.

    /// Full path to the users index file.
    pub fn users_path(&self) -> PathBuf {
        self.base.join(USERS_INFO_FILE)
    }

    /// Compute the directory path for a user. Does not create it.
    pub fn user_dir_name(&self, username: &str) -> PathBuf {
        self.base.join(username)
    }

    /// Full path to a user's project index file.
    pub fn projects_path(&self, username: &str) -> PathBuf {
        self.user_dir_name(username).join(PROJECTS_INFO_FILE)
    }

    /// Compute the directory path for a project. Does not create it.
    pub fn project_dir_name(&self, username: &str, project_title: &str) -> Result<PathBuf> {
        let qr_string = self.find_project(username, project_title)?.qr_string;
        Ok(self.user_dir_name(username).join(qr_string))
    }

    /// Get or create the directory for a project.
    pub fn project_dir(&self, username: &str, project_title: &str) -> Result<PathBuf> {
        let dir = self.project_dir_name(username, project_title)?;
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        Ok(dir)
    }

    /// Compute the directory path for an augmentation. Does not create it.
    pub fn aug_dir_name(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<PathBuf> {
        let project_dir = self.project_dir_name(username, project_title)?;
        let internal_id = self
            .find_augmentation(username, project_title, augmentation_title)?
            .internal_id;
        Ok(project_dir.join(internal_id))
    }

    /// Get or create the directory for an augmentation.
    pub fn aug_dir(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<PathBuf> {
        let dir = self.aug_dir_name(username, project_title, augmentation_title)?;
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        Ok(dir)
    }

    /// Get or create an augmentation's target image slot directory.
    pub fn aug_target_dir(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<PathBuf> {
        self.aug_slot_dir(username, project_title, augmentation_title, TARGET_IMAGE_DIR)
    }

    /// Get or create an augmentation's model slot directory.
    pub fn aug_model_dir(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<PathBuf> {
        self.aug_slot_dir(username, project_title, augmentation_title, MODEL_DIR)
    }

    /// Get or create an augmentation's session snapshot slot directory.
    pub fn aug_session_dir(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<PathBuf> {
        self.aug_slot_dir(username, project_title, augmentation_title, SESSION_DIR)
    }

    /// Get or create a project's public QR slot directory.
    pub fn pub_qr_dir(&self, username: &str, project_title: &str) -> Result<PathBuf> {
        self.qr_slot_dir(username, project_title, QR_PUB_DIR)
    }

    /// Get or create a project's admin QR slot directory.
    pub fn admin_qr_dir(&self, username: &str, project_title: &str) -> Result<PathBuf> {
        self.qr_slot_dir(username, project_title, QR_ADMIN_DIR)
    }

    /// Build the full slot directory structure for an augmentation.
    pub fn init_aug_dirs(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<()> {
        self.aug_target_dir(username, project_title, augmentation_title)?;
        self.aug_model_dir(username, project_title, augmentation_title)?;
        self.aug_session_dir(username, project_title, augmentation_title)?;

        Ok(())
    }

    fn aug_slot_dir(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
        slot: &str,
    ) -> Result<PathBuf> {
        let dir = self
            .aug_dir(username, project_title, augmentation_title)?
            .join(slot);
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        Ok(dir)
    }

    fn qr_slot_dir(&self, username: &str, project_title: &str, slot: &str) -> Result<PathBuf> {
        let dir = self
            .project_dir(username, project_title)?
            .join(QR_DIR)
            .join(slot);
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;
        Ok(dir)
    }

    // ------------------------------------------------------------------
    // Slot contents.

    /// Path of the file currently in the target image slot, if any.
    pub fn target_image_path(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<Option<PathBuf>> {
        let dir = self.aug_target_dir(username, project_title, augmentation_title)?;
        Ok(slot::first_file(&dir))
    }

    /// Path of the file currently in the model slot, if any.
    pub fn model_path(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<Option<PathBuf>> {
        let dir = self.aug_model_dir(username, project_title, augmentation_title)?;
        Ok(slot::first_file(&dir))
    }

    /// Path of the file currently in the session snapshot slot, if any.
    pub fn session_path(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<Option<PathBuf>> {
        let dir = self.aug_session_dir(username, project_title, augmentation_title)?;
        Ok(slot::first_file(&dir))
    }

    /// Check if the augmentation has a `.cxs` session snapshot stored.
    pub fn has_session_file(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<bool> {
        Ok(self
            .session_path(username, project_title, augmentation_title)?
            .map(|path| path.extension().is_some_and(|ext| ext == "cxs"))
            .unwrap_or(false))
    }

    /// Path of a project's QR image, admin or public, if downloaded.
    pub fn qr_file(
        &self,
        username: &str,
        project_title: &str,
        admin: bool,
    ) -> Result<Option<PathBuf>> {
        let dir = if admin {
            self.admin_qr_dir(username, project_title)?
        } else {
            self.pub_qr_dir(username, project_title)?
        };

        Ok(slot::first_file(&dir))
    }

    /// Empty a slot directory and copy an outside file into it.
    pub fn stage_into_slot(&self, dir: &Path, src: &Path) -> Result<PathBuf> {
        slot::empty_dir(dir)?;
        Ok(slot::copy_into(src, dir)?)
    }

    /// Persist downloaded bytes into a directory under their filename.
    pub fn store_download(&self, dir: &Path, download: Download) -> Result<PathBuf> {
        let path = dir.join(&download.filename);
        fs::write(&path, &download.body).map_err(io_error(&path))?;

        Ok(path)
    }

    // ------------------------------------------------------------------
    // Remote-backed file transfer.

    /// Download the augmentation's target image into its slot.
    ///
    /// Returns `Ok(None)` when the remote record has no target image yet;
    /// that is an ordinary state for a freshly created augmentation, not a
    /// failure.
    pub fn download_target_image(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<Option<PathBuf>> {
        let record = self.find_augmentation(username, project_title, augmentation_title)?;
        let Some(url) = record.target_image_url() else {
            return Ok(None);
        };
        let url = url.to_string();

        let dir = self.aug_target_dir(username, project_title, augmentation_title)?;
        slot::empty_dir(&dir)?;
        let download = self.remote.download(&url)?;

        self.store_download(&dir, download).map(Some)
    }

    /// Download the augmentation's model file into its slot.
    ///
    /// Returns `Ok(None)` when the remote record has no model file yet.
    pub fn download_model(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
    ) -> Result<Option<PathBuf>> {
        let record = self.find_augmentation(username, project_title, augmentation_title)?;
        let Some(url) = record.model_url() else {
            return Ok(None);
        };
        let url = url.to_string();

        let dir = self.aug_model_dir(username, project_title, augmentation_title)?;
        slot::empty_dir(&dir)?;
        let download = self.remote.download(&url)?;

        self.store_download(&dir, download).map(Some)
    }

    /// Download both QR images of a project into their slots.
    pub fn download_qr(
        &self,
        username: &str,
        project_title: &str,
    ) -> Result<(PathBuf, PathBuf)> {
        let token = self.user_token(username)?;
        let qr_string = self.find_project(username, project_title)?.qr_string;
        let record = self.remote.fetch_qr(&token, &qr_string)?;

        // If the QR image ever changes name, or extra files drift in, the
        // wipe keeps the one-file invariant intact.
        let pub_dir = self.pub_qr_dir(username, project_title)?;
        let admin_dir = self.admin_qr_dir(username, project_title)?;
        slot::empty_dir(&pub_dir)?;
        slot::empty_dir(&admin_dir)?;

        let public = self.remote.download(&record.public_url)?;
        let public = self.store_download(&pub_dir, public)?;
        let admin = self.remote.download(&record.admin_url)?;
        let admin = self.store_download(&admin_dir, admin)?;

        Ok((public, admin))
    }

    /// Stage an outside file into a slot and upload it to the service.
    ///
    /// The slot is emptied first so the staged file becomes its only
    /// occupant, then the service record is patched and the augmentation
    /// index refreshed to pick up the new cloud URLs.
    #[instrument(skip(self, src), level = "debug")]
    pub fn upload_slot_file(
        &self,
        username: &str,
        project_title: &str,
        augmentation_title: &str,
        src: &Path,
        field: UploadField,
    ) -> Result<PathBuf> {
        let token = self.user_token(username)?;
        let qr_string = self.find_project(username, project_title)?.qr_string;
        let aug_id = self
            .find_augmentation(username, project_title, augmentation_title)?
            .internal_id;

        let dir = match field {
            UploadField::TargetImage => {
                self.aug_target_dir(username, project_title, augmentation_title)?
            }
            UploadField::ModelFile => {
                self.aug_model_dir(username, project_title, augmentation_title)?
            }
        };
        let staged = self.stage_into_slot(&dir, src)?;

        self.remote
            .edit_augmentation(&token, &qr_string, &aug_id, &staged, field)?;
        self.refresh_augmentations(username, project_title)?;

        Ok(staged)
    }

    // ------------------------------------------------------------------
    // Reconciliation.

    /// Prune local state the remote no longer reports, for one user.
    ///
    /// Refreshes the project index, then deletes every directory under the
    /// user's root whose name is not a listed `qr_string`; then refreshes
    /// each project's augmentations and prunes augmentation directories the
    /// same way. The project-level `qr` directory is part of the expected
    /// set, because the remote issues a QR pair for every live project.
    ///
    /// A token the service no longer accepts aborts the whole operation
    /// before anything is deleted: a dead token must never cause data loss.
    #[instrument(skip(self), level = "debug")]
    pub fn clean_local(&self, username: &str) -> Result<CleanOutcome> {
        if !self.username_exists(username)? {
            return Err(CacheError::UnknownUser(username.to_string()));
        }

        let token = self.user_token(username)?;
        if !self.remote.validate_token(&token)? {
            warn!("user {username} has an invalid API token, consider removing the user");
            return Ok(CleanOutcome::SkippedInvalidToken);
        }

        self.refresh_projects(username)?;
        let projects = self.projects(username)?;

        let expected: HashSet<OsString> = projects
            .iter()
            .map(|project| OsString::from(&project.qr_string))
            .collect();
        let mut removed = self.prune_dirs(&self.user_dir_name(username), &expected)?;

        for project in &projects {
            self.refresh_augmentations(username, &project.title)?;
            let augmentations = self.augmentations(username, &project.title)?;

            let mut keep: HashSet<OsString> = augmentations
                .iter()
                .map(|aug| OsString::from(&aug.internal_id))
                .collect();
            keep.insert(OsString::from(QR_DIR));

            let project_dir = self.project_dir(username, &project.title)?;
            removed += self.prune_dirs(&project_dir, &keep)?;
        }

        Ok(CleanOutcome::Pruned { removed })
    }

    fn prune_dirs(&self, parent: &Path, keep: &HashSet<OsString>) -> Result<usize> {
        let entries = fs::read_dir(parent).map_err(io_error(parent))?;

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() || keep.contains(&entry.file_name()) {
                continue;
            }

            debug!("pruning orphaned cache directory {}", path.display());
            fs::remove_dir_all(&path).map_err(io_error(&path))?;
            removed += 1;
        }

        Ok(removed)
    }
}

/// What a reconciliation pass ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The user's token is no longer accepted; nothing was deleted.
    SkippedInvalidToken,

    /// Reconciliation ran; this many orphaned directories were removed.
    Pruned { removed: usize },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(io_error(path))?;
    let value = serde_json::from_str(&content).map_err(|source| CacheError::Index {
        source,
        path: path.to_path_buf(),
    })?;

    Ok(Some(value))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(|source| CacheError::Index {
        source,
        path: path.to_path_buf(),
    })?;

    fs::write(path, content).map_err(io_error(path))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CacheError {
    let path = path.to_path_buf();
    move |source| CacheError::Io { source, path }
}

/// All possible error types for cache interaction.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Username absent from the users index.
    #[error("user {0:?} not found in the local cache")]
    UnknownUser(String),

    /// Project title absent from the user's project index.
    #[error("project {0:?} not found in the local index")]
    UnknownProject(String),

    /// Augmentation title absent from the project's augmentation index.
    #[error("augmentation {0:?} not found in the local index")]
    UnknownAugmentation(String),

    /// A remote call failed; see [`RemoteError`] for the classification.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Slot manipulation failed.
    #[error(transparent)]
    Slot(#[from] slot::Error),

    /// Filesystem fault outside the cache's control.
    #[error("failed to access {}", path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Index file holds something other than the expected JSON shape.
    #[error("corrupt or unwritable index file {}", path.display())]
    Index {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
}

impl CacheError {
    /// Whether the failure is an expected, recoverable outcome.
    ///
    /// Not-found lookups and rejected or unreachable remote calls warrant a
    /// warning and an aborted operation. Server faults (HTTP 5xx) and
    /// filesystem errors are not recoverable here and must escalate to the
    /// host boundary.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnknownUser(_) | Self::UnknownProject(_) | Self::UnknownAugmentation(_) => true,
            Self::Remote(error) => !error.is_server_fault(),
            Self::Slot(_) | Self::Io { .. } | Self::Index { .. } => false,
        }
    }
}

/// Friendly result alias :3
pub type Result<T, E = CacheError> = std::result::Result<T, E>;
