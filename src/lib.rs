// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Scholsync keeps a local cache of Schol-AR augmented reality projects in
//! sync with the remote service.
//!
//! Two components do the real work. [`remote::RemoteClient`] wraps the small
//! REST surface the service exposes and classifies every failure the same
//! way. [`cache::CacheStore`] owns the on-disk mirror: JSON index files and
//! a directory tree keyed by server-assigned identifiers, with one-file
//! slot directories for each augmentation's target image, model, and
//! session snapshot, plus each project's QR image pair. The remote service
//! is always the source of truth; local state is a disposable cache.

pub mod cache;
pub mod config;
pub mod path;
pub mod record;
pub mod remote;

pub use cache::{CacheError, CacheStore, CleanOutcome};
pub use config::Settings;
pub use record::{AugRecord, ProjectKind, ProjectRecord, QrRecord};
pub use remote::{RemoteClient, RemoteError, UploadField};
