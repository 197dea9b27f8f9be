//! Partition manifest configuration.
//!
//! A manifest declares the fixed partition set for a partitioned stream in
//! JSON: each partition's name, storage kind, limits, and (for durable
//! partitions) backing file path. The driver loads a manifest, validates it,
//! and wires up the streams; partitions are never added after that.

use crate::bounded::StreamKind;
use crate::error::StreamError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional file name for a partition manifest
pub const PARTITION_MANIFEST_NAME: &str = "partitions.json";

/// Errors related to loading or validating partition manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(String),

    #[error("Failed to read manifest: {0}")]
    Io(String),

    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    #[error("Invalid manifest: {0}")]
    Invalid(String),

    #[error("Duplicate partition name: {0}")]
    DuplicatePartition(String),
}

/// Capacity and operation limit for one stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamConfig {
    /// Maximum number of stored messages
    pub capacity: usize,
    /// Maximum number of append/read operations before a reset is required
    pub operation_limit: u32,
}

impl StreamConfig {
    pub const fn new(capacity: usize, operation_limit: u32) -> Self {
        Self {
            capacity,
            operation_limit,
        }
    }

    /// Checks that both limits are greater than zero.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.capacity == 0 {
            return Err(StreamError::InvalidConfig(
                "Capacity must be greater than 0".to_string(),
            ));
        }
        if self.operation_limit == 0 {
            return Err(StreamError::InvalidConfig(
                "Operation limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// One partition declared in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionSpec {
    /// Partition name; unique within the manifest
    pub name: String,
    /// Storage kind backing this partition
    pub kind: StreamKind,
    /// Stream limits
    pub config: StreamConfig,
    /// Backing file path; required for durable partitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl PartitionSpec {
    /// Declares an in-memory partition
    pub fn in_memory(name: impl Into<String>, config: StreamConfig) -> Self {
        Self {
            name: name.into(),
            kind: StreamKind::InMemory,
            config,
            path: None,
        }
    }

    /// Declares a durable partition with a backing file
    pub fn durable(name: impl Into<String>, config: StreamConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind: StreamKind::Durable,
            config,
            path: Some(path.into()),
        }
    }
}

/// Top-level partition manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionManifest {
    pub partitions: Vec<PartitionSpec>,
}

impl PartitionManifest {
    pub fn new(partitions: Vec<PartitionSpec>) -> Self {
        Self { partitions }
    }

    /// Validates partition names, limits, and durable paths.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.partitions.is_empty() {
            return Err(ManifestError::Invalid(
                "Manifest declares no partitions".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for spec in &self.partitions {
            if spec.name.trim().is_empty() {
                return Err(ManifestError::Invalid(
                    "Partition name cannot be empty".to_string(),
                ));
            }
            if !names.insert(spec.name.clone()) {
                return Err(ManifestError::DuplicatePartition(spec.name.clone()));
            }
            spec.config
                .validate()
                .map_err(|err| ManifestError::Invalid(format!("{}: {}", spec.name, err)))?;
            if spec.kind == StreamKind::Durable && spec.path.is_none() {
                return Err(ManifestError::Invalid(format!(
                    "Durable partition {} has no path",
                    spec.name
                )));
            }
        }

        Ok(())
    }

    /// Parses and validates a manifest from a JSON string.
    pub fn from_json(data: &str) -> Result<Self, ManifestError> {
        let manifest: PartitionManifest =
            serde_json::from_str(data).map_err(|err| ManifestError::Parse(err.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serializes the manifest to pretty JSON.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(|err| ManifestError::Parse(err.to_string()))
    }

    /// Loads and validates a manifest file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ManifestError::NotFound(path.display().to_string()));
        }
        let data =
            fs::read_to_string(path).map_err(|err| ManifestError::Io(err.to_string()))?;
        Self::from_json(&data)
    }
}
