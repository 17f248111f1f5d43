//! Build request assembly
//!
//! Combines a [`PackageDescriptor`] and its [`BuildProfile`] into the
//! configuration handed to the bundler. The structural policy is fixed:
//! clean output, ES module plus UMD bundles, UMD global named after the
//! package, host framework externalized.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use crate::config::defaults;
use crate::core::package::PackageDescriptor;
use crate::core::profile::{BuildProfile, PluginSpec};

/// Bundle output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ES module
    Es,
    /// Universal module definition
    Umd,
    /// CommonJS
    Cjs,
    /// Immediately-invoked function expression
    Iife,
}

impl OutputFormat {
    /// Format name as understood by the bundler
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::Umd => "umd",
            Self::Cjs => "cjs",
            Self::Iife => "iife",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-package output layout shared by every request in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Output directory relative to the package root
    pub out_dir: PathBuf,
    /// Clear the output directory before writing
    pub empty_out_dir: bool,
    /// File name template containing `{format}`
    pub file_name: String,
    /// Formats to emit
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(defaults::OUT_DIR),
            empty_out_dir: true,
            file_name: defaults::FILE_NAME_TEMPLATE.to_string(),
            formats: vec![OutputFormat::Es, OutputFormat::Umd],
        }
    }
}

/// True for a relative path that names a directory strictly below its base
///
/// Rejects empty paths, `.`, absolute paths and any `..` component.
pub fn is_nested_relative(path: &Path) -> bool {
    let mut nested = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => nested = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    nested
}

/// Configuration passed to the build engine for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildRequest {
    /// Package root the bundler runs in
    pub root: PathBuf,
    /// Absolute output directory
    pub out_dir: PathBuf,
    /// Clear `out_dir` before writing
    pub empty_out_dir: bool,
    /// Library entry file
    pub entry: PathBuf,
    /// Global name of the UMD bundle
    pub library_name: String,
    /// Output file name template containing `{format}`
    pub file_name: String,
    /// Formats to emit
    pub formats: Vec<OutputFormat>,
    /// Dependency ids left out of the bundle
    pub external: BTreeSet<String>,
    /// Global symbol for each external dependency
    pub globals: BTreeMap<String, String>,
    /// Plugins in application order
    pub plugins: Vec<PluginSpec>,
}

impl BuildRequest {
    /// Assemble the request for a package
    pub fn assemble(
        descriptor: &PackageDescriptor,
        profile: &BuildProfile,
        layout: &OutputLayout,
    ) -> Self {
        let globals = profile.globals.clone();
        let external = globals.keys().cloned().collect();

        Self {
            root: descriptor.root.clone(),
            out_dir: descriptor.root.join(&layout.out_dir),
            empty_out_dir: layout.empty_out_dir,
            entry: descriptor.entry.clone(),
            library_name: descriptor.declared_name.clone(),
            file_name: layout.file_name.clone(),
            formats: layout.formats.clone(),
            external,
            globals,
            plugins: profile.plugins.clone(),
        }
    }

    /// Output file name for `format`
    pub fn file_name_for(&self, format: OutputFormat) -> String {
        self.file_name.replace(defaults::FORMAT_PLACEHOLDER, format.as_str())
    }

    /// Whether `out_dir` is a proper subdirectory of the package root
    ///
    /// Only such a directory may be emptied before a build.
    pub fn out_dir_within_root(&self) -> bool {
        self.out_dir
            .strip_prefix(&self.root)
            .is_ok_and(is_nested_relative)
    }

    /// Whether `dependency` is kept out of the bundle
    pub fn is_external(&self, dependency: &str) -> bool {
        self.external.contains(dependency)
    }

    /// Serialize to the JSON document consumed by the engine driver
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
