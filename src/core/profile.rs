//! Build profile classification
//!
//! Decides, from a package identifier alone, which framework variant a
//! package targets and therefore which compiler plugins and externals its
//! bundle uses. Classification is total: an identifier that does not carry
//! the legacy marker always falls through to the current variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::defaults;

/// Framework variant a package is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Previous framework major version
    Legacy,
    /// Current framework major version
    Current,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Opaque handle to a bundler plugin
///
/// The orchestrator never interprets it; the engine driver imports `module`
/// and calls its `export` to produce the plugin instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    /// Module specifier the plugin factory is imported from
    pub module: String,
    /// Named export of the factory (`default` for the default export)
    #[serde(default = "default_export")]
    pub export: String,
}

fn default_export() -> String {
    "default".to_string()
}

impl PluginSpec {
    /// Create a plugin handle
    pub fn new(module: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            export: export.into(),
        }
    }
}

impl std::fmt::Display for PluginSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.module, self.export)
    }
}

/// Plugins and externals applied to one package build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildProfile {
    /// Selected variant
    pub variant: Variant,
    /// Human-readable variant label (e.g. "Vue 2")
    pub label: String,
    /// Plugins, in application order
    pub plugins: Vec<PluginSpec>,
    /// Dependency ids that are never bundled, mapped to their global symbol
    pub globals: BTreeMap<String, String>,
}

impl BuildProfile {
    /// Dependency ids excluded from the bundle
    pub fn externals(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }
}

/// Classification rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRules {
    /// Identifier substring selecting [`Variant::Legacy`]
    pub legacy_marker: String,
    /// Label for the legacy variant
    pub legacy_label: String,
    /// Label for the current variant
    pub current_label: String,
    /// Plugins for the legacy variant
    pub legacy_plugins: Vec<PluginSpec>,
    /// Plugins for the current variant
    pub current_plugins: Vec<PluginSpec>,
    /// Host framework externals shared by both variants
    pub framework_globals: BTreeMap<String, String>,
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            legacy_marker: defaults::LEGACY_MARKER.to_string(),
            legacy_label: defaults::LEGACY_LABEL.to_string(),
            current_label: defaults::CURRENT_LABEL.to_string(),
            legacy_plugins: vec![PluginSpec::new(
                defaults::LEGACY_PLUGIN_MODULE,
                defaults::LEGACY_PLUGIN_EXPORT,
            )],
            current_plugins: vec![PluginSpec::new(
                defaults::CURRENT_PLUGIN_MODULE,
                defaults::CURRENT_PLUGIN_EXPORT,
            )],
            framework_globals: BTreeMap::from([(
                defaults::FRAMEWORK_MODULE.to_string(),
                defaults::FRAMEWORK_GLOBAL.to_string(),
            )]),
        }
    }
}

impl ProfileRules {
    /// Determine the variant for an identifier
    ///
    /// Case-sensitive substring match. An empty marker never matches, so a
    /// misconfigured marker cannot flip every package to the legacy variant.
    pub fn variant_of(&self, identifier: &str) -> Variant {
        if !self.legacy_marker.is_empty() && identifier.contains(&self.legacy_marker) {
            Variant::Legacy
        } else {
            Variant::Current
        }
    }

    /// Resolve the full build profile for an identifier
    pub fn classify(&self, identifier: &str) -> BuildProfile {
        let variant = self.variant_of(identifier);
        let (label, plugins) = match variant {
            Variant::Legacy => (&self.legacy_label, &self.legacy_plugins),
            Variant::Current => (&self.current_label, &self.current_plugins),
        };

        BuildProfile {
            variant,
            label: label.clone(),
            plugins: plugins.clone(),
            globals: self.framework_globals.clone(),
        }
    }
}

/// Classify an identifier with the default rules
pub fn classify_profile(identifier: &str) -> BuildProfile {
    ProfileRules::default().classify(identifier)
}
