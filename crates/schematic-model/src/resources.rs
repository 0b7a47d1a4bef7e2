//! Resource requirements of a container.

use serde::{Deserialize, Serialize};

use crate::wire::nullable;

/// Minimum number of logical CPUs required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpu {
    /// Logical CPUs. Must not be negative.
    pub required: f64,
}

/// Minimum memory, in MB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Memory {
    /// Positive integer string. Empty means unspecified.
    pub required: String,
}

impl Memory {
    /// Returns the requirement in MB if it is a positive integer.
    ///
    /// Only plain ASCII digits are accepted; signs, whitespace and
    /// fractions are not.
    #[must_use]
    pub fn megabytes(&self) -> Option<u64> {
        if self.required.is_empty() || !self.required.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.required.parse::<u64>().ok().filter(|&mb| mb > 0)
    }
}

/// Minimum number of GPUs required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gpu {
    /// GPUs. Must not be negative.
    pub required: f64,
}

/// Access mode of a volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Read/write.
    #[serde(rename = "RW")]
    ReadWrite,
    /// Read-only.
    #[serde(rename = "RO")]
    ReadOnly,
    /// Not set. Written as the empty string.
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// Whether a volume can be shared across containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SharingPolicy {
    /// Attachable to several containers.
    Shared,
    /// Attachable to one container only.
    Exclusive,
    /// Not set. Written as the empty string.
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// Disk backing a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disk {
    /// Required disk size.
    pub required: String,
    /// Whether the disk is discarded with the container.
    pub ephemeral: bool,
}

/// A path attached to a container, with its requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volume {
    /// Volume name, unique within the container.
    pub name: String,
    /// Absolute mount path, unique within the container.
    pub mount_path: String,
    /// Access mode.
    pub access_mode: AccessMode,
    /// Sharing policy.
    pub sharing_policy: SharingPolicy,
    /// Backing disk.
    pub disk: Disk,
}

/// A vendor-specific resource requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendedResource {
    /// Resource name.
    pub name: String,
    /// Required quantity.
    pub required: String,
}

/// All resource requirements of a container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    /// CPU requirement.
    pub cpu: Cpu,
    /// Memory requirement.
    pub memory: Memory,
    /// GPU requirement.
    pub gpu: Gpu,
    /// Attached volumes.
    #[serde(deserialize_with = "nullable")]
    pub volumes: Vec<Volume>,
    /// Extended resources.
    #[serde(deserialize_with = "nullable")]
    pub extended: Vec<ExtendedResource>,
}
