//! Package unit descriptors
//!
//! A descriptor is everything the orchestrator needs to know about one
//! package directory: its identifier (directory name), root, declared name
//! from `package.json`, and library entry file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::defaults::PACKAGE_METADATA_FILE;
use crate::error::PackageError;

/// Subset of `package.json` the build needs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageMetadata {
    /// Declared package name
    pub name: Option<String>,
}

impl PackageMetadata {
    /// Parse metadata from `package.json` content
    pub fn from_json(package: &str, content: &str) -> Result<Self, PackageError> {
        serde_json::from_str(content).map_err(|e| PackageError::ParseError {
            package: package.to_string(),
            error: e.to_string(),
        })
    }
}

/// Resolved description of one package unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    /// Directory name, unique within a run
    pub identifier: String,
    /// Absolute package root
    pub root: PathBuf,
    /// `name` field of the package metadata
    pub declared_name: String,
    /// Library entry file
    pub entry: PathBuf,
}

impl PackageDescriptor {
    /// Load the descriptor for `identifier` under `packages_dir`
    ///
    /// `entry` is relative to the package root. The entry file is not checked
    /// here; a missing entry surfaces as an engine failure.
    pub fn load(packages_dir: &Path, identifier: &str, entry: &Path) -> Result<Self, PackageError> {
        let root = packages_dir.join(identifier);
        let metadata_path = root.join(PACKAGE_METADATA_FILE);

        if !metadata_path.is_file() {
            return Err(PackageError::MetadataNotFound {
                package: identifier.to_string(),
                path: metadata_path,
            });
        }

        let content = std::fs::read_to_string(&metadata_path).map_err(|e| PackageError::IoError {
            path: metadata_path.clone(),
            error: e.to_string(),
        })?;
        let metadata = PackageMetadata::from_json(identifier, &content)?;

        let declared_name = metadata
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PackageError::MissingField {
                package: identifier.to_string(),
                field: "name".to_string(),
            })?;

        Ok(Self {
            identifier: identifier.to_string(),
            entry: root.join(entry),
            root,
            declared_name,
        })
    }
}
