//! Workspace configuration
//!
//! Reads the optional `monobuild.toml` at the workspace root. Every setting
//! has a default, so a workspace without the file builds with the stock
//! layout: `packages/*/src/index.ts` → `dist/index.{es,umd}.js`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::profile::{PluginSpec, ProfileRules};
use crate::core::request::{is_nested_relative, OutputFormat, OutputLayout};
use crate::error::ConfigError;

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Packages directory relative to the workspace root
    #[serde(default = "default_packages_dir")]
    pub packages_dir: PathBuf,

    /// Per-package layout
    #[serde(default)]
    pub package: PackageConfig,

    /// Host framework settings
    #[serde(default)]
    pub framework: FrameworkConfig,

    /// Variant classification and plugins
    #[serde(default)]
    pub profiles: ProfilesConfig,

    /// Build engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_packages_dir() -> PathBuf {
    PathBuf::from(defaults::PACKAGES_DIR)
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            packages_dir: default_packages_dir(),
            package: PackageConfig::default(),
            framework: FrameworkConfig::default(),
            profiles: ProfilesConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Per-package layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Entry file relative to the package root
    pub entry: PathBuf,
    /// Output directory relative to the package root
    pub out_dir: PathBuf,
    /// Clear the output directory before building
    pub empty_out_dir: bool,
    /// Output file name template containing `{format}`
    pub file_name: String,
    /// Bundle formats
    pub formats: Vec<OutputFormat>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        let layout = OutputLayout::default();
        Self {
            entry: PathBuf::from(defaults::ENTRY_FILE),
            out_dir: layout.out_dir,
            empty_out_dir: layout.empty_out_dir,
            file_name: layout.file_name,
            formats: layout.formats,
        }
    }
}

/// Host framework settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Framework module id
    pub module: String,
    /// Global symbol the framework is exposed under
    pub global: String,
    /// Additional externals and their globals
    pub globals: BTreeMap<String, String>,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            module: defaults::FRAMEWORK_MODULE.to_string(),
            global: defaults::FRAMEWORK_GLOBAL.to_string(),
            globals: BTreeMap::new(),
        }
    }
}

/// Variant classification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Identifier substring selecting the legacy variant
    pub legacy_marker: String,
    /// Display label for the legacy variant
    pub legacy_label: String,
    /// Display label for the current variant
    pub current_label: String,
    /// Legacy variant plugins
    pub legacy: VariantConfig,
    /// Current variant plugins
    pub current: VariantConfig,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        let rules = ProfileRules::default();
        Self {
            legacy_marker: rules.legacy_marker,
            legacy_label: rules.legacy_label,
            current_label: rules.current_label,
            legacy: VariantConfig {
                plugins: rules.legacy_plugins,
            },
            current: VariantConfig {
                plugins: rules.current_plugins,
            },
        }
    }
}

/// Plugins for one variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Plugins in application order
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
}

/// Build engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Node.js executable
    pub node: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            node: defaults::NODE_BINARY.to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Load `monobuild.toml` from the workspace root, or defaults if absent
    pub fn load(workspace_root: &Path) -> Result<Self, ConfigError> {
        let path = workspace_root.join(defaults::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", defaults::CONFIG_FILE);
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Classification rules derived from this configuration
    ///
    /// The framework module is always part of the externals, whatever the
    /// extra globals say.
    pub fn profile_rules(&self) -> ProfileRules {
        let mut framework_globals = self.framework.globals.clone();
        framework_globals.insert(self.framework.module.clone(), self.framework.global.clone());

        ProfileRules {
            legacy_marker: self.profiles.legacy_marker.clone(),
            legacy_label: self.profiles.legacy_label.clone(),
            current_label: self.profiles.current_label.clone(),
            legacy_plugins: self.profiles.legacy.plugins.clone(),
            current_plugins: self.profiles.current.plugins.clone(),
            framework_globals,
        }
    }

    /// Output layout derived from this configuration
    ///
    /// The output directory is emptied before each build, so it must be a
    /// relative path strictly below the package root.
    pub fn output_layout(&self) -> Result<OutputLayout, ConfigError> {
        if !is_nested_relative(&self.package.out_dir) {
            return Err(ConfigError::InvalidOutDir {
                path: self.package.out_dir.clone(),
            });
        }

        Ok(OutputLayout {
            out_dir: self.package.out_dir.clone(),
            empty_out_dir: self.package.empty_out_dir,
            file_name: self.package.file_name.clone(),
            formats: self.package.formats.clone(),
        })
    }

    /// Absolute packages directory for a workspace root
    pub fn packages_dir(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.packages_dir)
    }
}
