//! Package discovery
//!
//! Lists the package units of a monorepo: the immediate subdirectories of
//! the packages directory.

use std::path::Path;

use crate::error::PackageError;

/// List package identifiers under `packages_dir`, sorted by name
///
/// Plain files and symlinks to files are ignored.
pub fn discover_packages(packages_dir: &Path) -> Result<Vec<String>, PackageError> {
    if !packages_dir.is_dir() {
        return Err(PackageError::PackagesDirNotFound {
            path: packages_dir.to_path_buf(),
        });
    }

    let mut identifiers = Vec::new();
    for entry in walkdir::WalkDir::new(packages_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| PackageError::IoError {
            path: packages_dir.to_path_buf(),
            error: e.to_string(),
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        identifiers.push(entry.file_name().to_string_lossy().into_owned());
    }

    tracing::debug!(
        "Discovered {} packages in {}",
        identifiers.len(),
        packages_dir.display()
    );
    Ok(identifiers)
}

/// Restrict `identifiers` to `selected`, keeping discovery order
///
/// An empty selection keeps everything. A selected name that was not
/// discovered is an error.
pub fn select_packages(
    identifiers: Vec<String>,
    selected: &[String],
    packages_dir: &Path,
) -> Result<Vec<String>, PackageError> {
    if selected.is_empty() {
        return Ok(identifiers);
    }

    if let Some(missing) = selected.iter().find(|name| !identifiers.contains(name)) {
        return Err(PackageError::NotFound {
            name: missing.clone(),
            packages_dir: packages_dir.to_path_buf(),
        });
    }

    Ok(identifiers
        .into_iter()
        .filter(|id| selected.contains(id))
        .collect())
}
