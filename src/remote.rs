// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Remote service client.
//!
//! Thin stateless wrapper over the small set of REST endpoints the Schol-AR
//! service exposes. Every public operation performs exactly one HTTP call
//! authenticated with an `Authorization: Token <api_token>` header, and
//! classifies failures uniformly:
//!
//! - Transport failure (no response at all) becomes [`RemoteError::Offline`].
//!   The caller may retry later; nothing is retried automatically.
//! - HTTP 4xx becomes [`RemoteError::Api`]: the request itself was wrong
//!   (bad token, unknown project, ...) and the calling code can act on it.
//! - HTTP 5xx becomes [`RemoteError::ServerFault`]: the service itself is
//!   unhealthy, which nothing in this process can fix. Callers must surface
//!   it prominently instead of downgrading it to a routine warning.
//!
//! The client never touches the local cache directory. Downloads hand back
//! the raw bytes plus a sanitized filename and leave persistence to the
//! caller.

use crate::{
    config::Settings,
    record::{AugRecord, ProjectKind, ProjectRecord, QrRecord},
};

use reqwest::{
    blocking::{multipart::Form, Client, Response},
    header::{AUTHORIZATION, CONTENT_TYPE},
    StatusCode, Url,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Client for the Schol-AR REST API.
///
/// Stateless besides connection reuse inside the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    base_url: String,
    max_upload_mb: u64,
}

impl RemoteClient {
    /// Construct new remote client from settings.
    ///
    /// # Errors
    ///
    /// - Return [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("scholsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| RemoteError::Http { source })?;

        Ok(Self {
            http,
            base_url: settings.service.url.trim_end_matches('/').to_string(),
            max_upload_mb: settings.service.max_upload_mb,
        })
    }

    /// Check whether an API token is accepted by the service.
    ///
    /// Issues the cheapest listing call. A 401 here is an expected outcome
    /// meaning "invalid token", so it maps to `Ok(false)` without any logged
    /// error. Every other failure classifies as usual.
    pub fn validate_token(&self, token: &str) -> Result<bool> {
        let response = self.get(&["api", "ListARP"], token)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(false);
        }

        classify(response).map(|_| true)
    }

    /// List all projects owned by the token's user.
    #[instrument(skip(self, token), level = "debug")]
    pub fn list_projects(&self, token: &str) -> Result<Vec<ProjectRecord>> {
        let response = self.get(&["api", "ListARP"], token)?;
        parse(classify(response)?)
    }

    /// Create a new project on the service.
    #[instrument(skip(self, token, disc_url), level = "debug")]
    pub fn create_project(
        &self,
        token: &str,
        title: &str,
        kind: ProjectKind,
        disc_url: &str,
    ) -> Result<ProjectRecord> {
        let body = serde_json::json!({
            "project_title": title,
            "project_type": kind.as_str(),
            "disc_url": disc_url,
        });

        // The service rejects project creation unless the JSON content type
        // is spelled out on the request.
        let response = self
            .http
            .post(self.endpoint(&["api", "CreateARP"]))
            .header(AUTHORIZATION, token_header(token))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .map_err(RemoteError::offline)?;

        parse(classify(response)?)
    }

    /// List all augmentations of a project.
    #[instrument(skip(self, token), level = "debug")]
    pub fn list_augmentations(&self, token: &str, qr_string: &str) -> Result<Vec<AugRecord>> {
        let response = self.get(&["api", "ListAug", qr_string], token)?;
        parse(classify(response)?)
    }

    /// Create a new augmentation under a project.
    #[instrument(skip(self, token), level = "debug")]
    pub fn create_augmentation(
        &self,
        token: &str,
        qr_string: &str,
        title: &str,
        kind: &str,
    ) -> Result<AugRecord> {
        let body = serde_json::json!({
            "augmentation_title": title,
            "augmentation_type": kind,
        });

        let response = self
            .http
            .post(self.endpoint(&["api", "CreateAug", qr_string]))
            .header(AUTHORIZATION, token_header(token))
            .json(&body)
            .send()
            .map_err(RemoteError::offline)?;

        parse(classify(response)?)
    }

    /// Replace one file of an augmentation through a multipart PATCH.
    ///
    /// Exactly one file part is sent, under the field name [`UploadField`]
    /// selects. Refuses oversized files before any network I/O happens.
    ///
    /// # Errors
    ///
    /// - Return [`RemoteError::OversizeUpload`] if the file exceeds the
    ///   configured ceiling.
    /// - Return [`RemoteError::Upload`] if the file cannot be read at all.
    #[instrument(skip(self, token), level = "debug")]
    pub fn edit_augmentation(
        &self,
        token: &str,
        qr_string: &str,
        aug_id: &str,
        file_path: &Path,
        field: UploadField,
    ) -> Result<AugRecord> {
        let metadata = std::fs::metadata(file_path).map_err(|source| RemoteError::Upload {
            source,
            path: file_path.to_path_buf(),
        })?;
        if metadata.len() >= self.max_upload_mb * 1024 * 1024 {
            return Err(RemoteError::OversizeUpload {
                path: file_path.to_path_buf(),
                limit_mb: self.max_upload_mb,
            });
        }

        let form = Form::new()
            .file(field.field_name(), file_path)
            .map_err(|source| RemoteError::Upload {
                source,
                path: file_path.to_path_buf(),
            })?;

        let response = self
            .http
            .patch(self.endpoint(&["api", "EditAug", qr_string, aug_id]))
            .header(AUTHORIZATION, token_header(token))
            .multipart(form)
            .send()
            .map_err(RemoteError::offline)?;

        parse(classify(response)?)
    }

    /// Fetch the cloud URLs of a project's QR image pair.
    #[instrument(skip(self, token), level = "debug")]
    pub fn fetch_qr(&self, token: &str, qr_string: &str) -> Result<QrRecord> {
        let response = self.get(&["api", "GetQR", qr_string], token)?;
        parse(classify(response)?)
    }

    /// Download a file from a cloud URL.
    ///
    /// The request is unauthenticated; the cloud URLs the service hands out
    /// are pre-signed. Returns the body together with a filename derived
    /// from the URL path's final segment and sanitized, so the caller can
    /// persist it wherever it wants.
    #[instrument(skip(self), level = "debug")]
    pub fn download(&self, url: &str) -> Result<Download> {
        let response = self.http.get(url).send().map_err(RemoteError::offline)?;
        let response = classify(response)?;
        let body = response.bytes().map_err(RemoteError::offline)?.to_vec();
        let filename = filename_from_url(url);
        debug!("downloaded {} bytes as {filename:?}", body.len());

        Ok(Download { filename, body })
    }

    fn get(&self, segments: &[&str], token: &str) -> Result<Response> {
        self.http
            .get(self.endpoint(segments))
            .header(AUTHORIZATION, token_header(token))
            .send()
            .map_err(RemoteError::offline)
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }

        url
    }
}

/// One downloaded file: sanitized filename plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Filename derived from the source URL, safe to join onto a directory.
    pub filename: String,

    /// Raw response body.
    pub body: Vec<u8>,
}

/// File slot a multipart upload goes into on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadField {
    /// The printed image the AR viewer tracks.
    TargetImage,

    /// The 3D asset displayed over the target image.
    ModelFile,
}

impl UploadField {
    /// Multipart field name the service expects for this slot.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::TargetImage => "target_image",
            Self::ModelFile => "augmented_file",
        }
    }
}

/// Extract a local filename from a cloud download URL.
///
/// Takes the final segment of the URL path and neutralizes anything a
/// hostile or malformed URL could smuggle into it. This is path-traversal
/// protection, not filename prettification.
pub fn filename_from_url(url: &str) -> String {
    let path = Url::parse(url)
        .map(|parsed| parsed.path().to_string())
        .unwrap_or_else(|_| url.to_string());
    let name = path.rsplit('/').next().unwrap_or_default();

    sanitize_filename(name)
}

/// Sanitize a filename by neutralizing special characters.
///
/// Characters illegal on common filesystems and ASCII control characters
/// are replaced with `_`, and `..` sequences are collapsed so the result
/// can never climb out of the directory it is joined onto.
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        })
        .collect();

    cleaned.replace("..", "_")
}

fn token_header(token: &str) -> String {
    format!("Token {token}")
}

fn classify(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    if status.is_server_error() {
        return Err(RemoteError::ServerFault { status, url });
    }

    Err(RemoteError::Api { status, url })
}

fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    let url = response.url().to_string();
    response
        .json()
        .map_err(|source| RemoteError::Decode { source, url })
}

/// All possible error types for remote service interaction.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response (DNS, connection, ...).
    #[error("Schol-AR request failed before a response arrived")]
    Offline {
        #[source]
        source: reqwest::Error,
    },

    /// The service rejected the request (HTTP 4xx).
    #[error("Schol-AR call to {url} was rejected with {status}")]
    Api { status: StatusCode, url: String },

    /// The service itself failed (HTTP 5xx). Surface this loudly.
    #[error("Schol-AR server error {status} making the API call to {url}")]
    ServerFault { status: StatusCode, url: String },

    /// A 2xx response whose body does not parse as the expected record.
    #[error("malformed response body from {url}")]
    Decode {
        #[source]
        source: reqwest::Error,
        url: String,
    },

    /// The upload file cannot be read.
    #[error("cannot read upload file {}", path.display())]
    Upload {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The upload file is larger than the service accepts.
    #[error("upload file {} must be smaller than {limit_mb} MB", path.display())]
    OversizeUpload { path: PathBuf, limit_mb: u64 },

    /// The HTTP client itself cannot be constructed.
    #[error("failed to construct HTTP client")]
    Http {
        #[source]
        source: reqwest::Error,
    },
}

impl RemoteError {
    fn offline(source: reqwest::Error) -> Self {
        Self::Offline { source }
    }

    /// Whether this failure is a server-side fault (HTTP 5xx) that must be
    /// escalated instead of warned about.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::ServerFault { .. })
    }
}

/// Friendly result alias :3
pub type Result<T, E = RemoteError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_neutralizes_traversal() {
        let result = sanitize_filename("../../etc/passwd");
        assert!(!result.contains(".."));
        assert!(!result.starts_with('/'));
        assert_eq!(result, "___etc_passwd");
    }

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_filename("report<1>.glb"), "report_1_.glb");
        assert_eq!(sanitize_filename("a:b|c?d*e\"f"), "a_b_c_d_e_f");
        assert_eq!(sanitize_filename("tab\there"), "tab_here");
    }

    #[test]
    fn filename_from_url_takes_final_segment() {
        let result =
            filename_from_url("https://storage.example.com/media/xyz123/figure1.png?sig=abc");
        assert_eq!(result, "figure1.png");
    }

    #[test]
    fn filename_from_url_survives_unparseable_input() {
        let result = filename_from_url("not a url/../trick.png");
        assert!(!result.contains(".."));
    }
}
