// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Remote record layouts.
//!
//! Specify the layout of the JSON records the Schol-AR service sends back,
//! to simplify serialization and deserialization. The same layouts double as
//! the on-disk index file format, so every record keeps an overflow map of
//! the remote fields scholsync does not consume itself. Network and file I/O
//! are left to the caller to figure out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// The only augmentation type the service currently accepts.
pub const MODEL_AUGMENTATION: &str = "model";

/// A project as the remote service reports it.
///
/// `qr_string` is the stable server-assigned identifier, and doubles as the
/// local directory name for the project. The human title is mutable and
/// user-supplied, so it never becomes a path component.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct ProjectRecord {
    /// Human readable project title, unique per user on the remote side.
    #[serde(rename = "project_title")]
    pub title: String,

    /// Project category, one of the [`ProjectKind`] wire strings.
    #[serde(rename = "project_type", default)]
    pub kind: String,

    /// Optional URL to the published work the project belongs to.
    #[serde(rename = "disc_url", default)]
    pub disc_url: String,

    /// Stable server-assigned identifier, filesystem safe.
    #[serde(rename = "QRString")]
    pub qr_string: String,

    /// Remote fields scholsync does not consume, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An augmentation as the remote service reports it.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct AugRecord {
    /// Human readable augmentation title, unique per project.
    #[serde(rename = "augmentation_title")]
    pub title: String,

    /// Augmentation type. Only [`MODEL_AUGMENTATION`] is supported.
    #[serde(rename = "augmentation_type", default)]
    pub kind: String,

    /// Server-assigned identifier, doubles as the local directory name.
    #[serde(rename = "internal_augid")]
    pub internal_id: String,

    /// Cloud URL of the current target image, if one was uploaded.
    #[serde(rename = "target_image", default)]
    pub target_image: Option<String>,

    /// Cloud URL of the current augmented model file, if one was uploaded.
    #[serde(rename = "augmented_file", default)]
    pub augmented_file: Option<String>,

    /// Image tracking quality score reported by the service.
    #[serde(rename = "targetimage_trackscore", default)]
    pub tracking_score: Option<f64>,

    /// Remote fields scholsync does not consume, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AugRecord {
    /// Cloud URL of the target image.
    ///
    /// The service reports an empty string for an augmentation that has no
    /// target image yet, so empty counts as absent.
    pub fn target_image_url(&self) -> Option<&str> {
        self.target_image.as_deref().filter(|url| !url.is_empty())
    }

    /// Cloud URL of the augmented model file. Empty counts as absent.
    pub fn model_url(&self) -> Option<&str> {
        self.augmented_file.as_deref().filter(|url| !url.is_empty())
    }

    /// Tracking score bucketed into 0 to 5 stars.
    ///
    /// The service scores target image trackability on a 0-100 scale, and a
    /// negative score means the image is still being processed. Returns
    /// [`None`] until a non-negative score is available.
    pub fn tracking_stars(&self) -> Option<u8> {
        match self.tracking_score {
            Some(score) if score >= 0.0 => Some((score / 20.0).floor() as u8),
            _ => None,
        }
    }
}

/// The pair of QR image URLs the remote service issues per project.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct QrRecord {
    /// Cloud URL of the public QR image handed out to viewers.
    #[serde(rename = "QR_Image1")]
    pub public_url: String,

    /// Cloud URL of the admin QR image that grants edit access.
    #[serde(rename = "AdminQRImage")]
    pub admin_url: String,

    /// Remote fields scholsync does not consume, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project categories the remote service accepts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Scientific paper.
    Paper,

    /// Poster or other presentation.
    Poster,

    /// Book or chapter.
    Book,

    /// Anything else.
    #[default]
    Other,
}

impl ProjectKind {
    /// All accepted project kinds.
    pub const ALL: [ProjectKind; 4] = [Self::Paper, Self::Poster, Self::Book, Self::Other];

    /// Wire string the remote service expects for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Poster => "poster",
            Self::Book => "book",
            Self::Other => "other",
        }
    }
}

impl Display for ProjectKind {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = UnknownProjectKind;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        match data {
            "paper" => Ok(Self::Paper),
            "poster" => Ok(Self::Poster),
            "book" => Ok(Self::Book),
            "other" => Ok(Self::Other),
            _ => Err(UnknownProjectKind(data.to_string())),
        }
    }
}

/// Project type string the remote service would reject.
#[derive(Clone, Debug, thiserror::Error)]
#[error("unknown project type {0:?}, expected one of: paper, poster, book, other")]
pub struct UnknownProjectKind(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use simple_test_case::test_case;

    #[test]
    fn project_record_round_trip_keeps_unconsumed_fields() -> anyhow::Result<()> {
        let raw = serde_json::json!({
            "project_title": "My Poster",
            "project_type": "poster",
            "disc_url": "https://doi.org/10.0/xyz",
            "QRString": "xyz123",
            "date_created": "2024-07-30",
        });

        let record: ProjectRecord = serde_json::from_value(raw.clone())?;
        assert_eq!(record.title, "My Poster");
        assert_eq!(record.qr_string, "xyz123");
        assert_eq!(
            record.extra.get("date_created"),
            Some(&Value::from("2024-07-30"))
        );

        let back = serde_json::to_value(&record)?;
        assert_eq!(back, raw);

        Ok(())
    }

    #[test]
    fn aug_record_empty_urls_count_as_absent() -> anyhow::Result<()> {
        let record: AugRecord = serde_json::from_value(serde_json::json!({
            "augmentation_title": "Figure1",
            "augmentation_type": "model",
            "internal_augid": "a1",
            "target_image": "",
            "augmented_file": null,
        }))?;

        assert_eq!(record.target_image_url(), None);
        assert_eq!(record.model_url(), None);

        Ok(())
    }

    #[test_case(Some(-1.0), None; "negative means still processing")]
    #[test_case(None, None; "missing score")]
    #[test_case(Some(0.0), Some(0); "zero")]
    #[test_case(Some(19.9), Some(0); "below first bucket")]
    #[test_case(Some(59.0), Some(2); "mid scale")]
    #[test_case(Some(100.0), Some(5); "full score")]
    #[test]
    fn tracking_stars_buckets_by_twenty(score: Option<f64>, expect: Option<u8>) {
        let record = AugRecord {
            title: "Figure1".into(),
            kind: MODEL_AUGMENTATION.into(),
            internal_id: "a1".into(),
            target_image: None,
            augmented_file: None,
            tracking_score: score,
            extra: Map::new(),
        };

        self::assert_eq!(record.tracking_stars(), expect);
    }

    #[test]
    fn project_kind_wire_strings() {
        for kind in ProjectKind::ALL {
            let parsed: ProjectKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }

        assert!("presentation".parse::<ProjectKind>().is_err());
    }
}
