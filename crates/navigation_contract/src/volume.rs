//! Volume handles, volume type tags, and synthetic root types reported by the host volume manager.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable host identifier for a mounted volume.
///
/// Two [`VolumeInfo`] values refer to the same volume handle when their ids match, regardless of
/// label changes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VolumeId(String);

impl VolumeId {
    /// Creates a volume id from trusted host input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Volume type tag reported by the host volume manager.
pub enum VolumeType {
    /// The local Downloads volume.
    Downloads,
    /// The Linux (Crostini) container volume.
    Crostini,
    /// Android (ARC) files.
    AndroidFiles,
    /// Removable media such as USB sticks and SD cards.
    Removable,
    /// Mounted archive file.
    Archive,
    /// MTP device.
    Mtp,
    /// Drive cloud storage.
    Drive,
    /// File system provider extension volume.
    Provided,
    /// Media view (images, videos, audio) exposed by Android.
    MediaView,
    /// Host-side test volume. No sidebar layout places it.
    Testing,
}

impl VolumeType {
    /// All known volume types in declaration order.
    pub const ALL: [VolumeType; 10] = [
        Self::Downloads,
        Self::Crostini,
        Self::AndroidFiles,
        Self::Removable,
        Self::Archive,
        Self::Mtp,
        Self::Drive,
        Self::Provided,
        Self::MediaView,
        Self::Testing,
    ];

    /// Returns the host tag for this volume type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Downloads => "downloads",
            Self::Crostini => "crostini",
            Self::AndroidFiles => "android_files",
            Self::Removable => "removable",
            Self::Archive => "archive",
            Self::Mtp => "mtp",
            Self::Drive => "drive",
            Self::Provided => "provided",
            Self::MediaView => "media_view",
            Self::Testing => "testing",
        }
    }
}

impl fmt::Display for VolumeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown volume type `{0}`")]
/// Returned when a host volume type tag has no [`VolumeType`] counterpart.
pub struct UnknownVolumeType(pub String);

impl FromStr for VolumeType {
    type Err = UnknownVolumeType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|volume_type| volume_type.as_str() == raw)
            .ok_or_else(|| UnknownVolumeType(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Mounted volume as reported by the host volume manager.
pub struct VolumeInfo {
    /// Handle identity of the volume.
    pub volume_id: VolumeId,
    /// Volume type tag.
    pub volume_type: VolumeType,
    /// User-facing label.
    pub label: String,
}

impl VolumeInfo {
    /// Creates a volume description.
    pub fn new(
        volume_id: impl Into<String>,
        volume_type: VolumeType,
        label: impl Into<String>,
    ) -> Self {
        Self {
            volume_id: VolumeId::new(volume_id),
            volume_type,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Root type of a synthetic (fake) navigation root.
pub enum RootType {
    /// Recently modified files across volumes.
    Recent,
    /// Linux files placeholder shown before the container volume is mounted.
    Crostini,
    /// The My Files grouping root.
    MyFiles,
}
