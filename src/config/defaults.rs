//! Default configuration values

/// Name of the optional workspace configuration file
pub const CONFIG_FILE: &str = "monobuild.toml";

/// Directory (relative to the workspace root) holding the package units
pub const PACKAGES_DIR: &str = "packages";

/// Package metadata file inside each package unit
pub const PACKAGE_METADATA_FILE: &str = "package.json";

/// Library entry file, relative to the package root
pub const ENTRY_FILE: &str = "src/index.ts";

/// Output directory, relative to the package root
pub const OUT_DIR: &str = "dist";

/// Output file name template; `{format}` is replaced by the bundle format
pub const FILE_NAME_TEMPLATE: &str = "index.{format}.js";

/// Placeholder substituted in [`FILE_NAME_TEMPLATE`]
pub const FORMAT_PLACEHOLDER: &str = "{format}";

/// Substring of a package directory name that selects the legacy variant
pub const LEGACY_MARKER: &str = "v2";

/// Host framework module, never bundled
pub const FRAMEWORK_MODULE: &str = "vue";

/// Global symbol the host framework is exposed under
pub const FRAMEWORK_GLOBAL: &str = "Vue";

/// Display label for the legacy variant
pub const LEGACY_LABEL: &str = "Vue 2";

/// Display label for the current variant
pub const CURRENT_LABEL: &str = "Vue 3";

/// Plugin module compiling single-file components for the legacy variant
pub const LEGACY_PLUGIN_MODULE: &str = "vite-plugin-vue2";

/// Export of [`LEGACY_PLUGIN_MODULE`] producing the plugin
pub const LEGACY_PLUGIN_EXPORT: &str = "createVuePlugin";

/// Plugin module compiling single-file components for the current variant
pub const CURRENT_PLUGIN_MODULE: &str = "@vitejs/plugin-vue";

/// Export of [`CURRENT_PLUGIN_MODULE`] producing the plugin
pub const CURRENT_PLUGIN_EXPORT: &str = "default";

/// Node.js executable used to drive the bundler
pub const NODE_BINARY: &str = "node";

/// Environment variable overriding the engine executable
pub const ENV_NODE: &str = "MONOBUILD_NODE";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
