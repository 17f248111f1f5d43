//! Error types for monobuild
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Package metadata errors
#[derive(Error, Debug)]
pub enum PackageError {
    /// Packages directory does not exist
    #[error("Packages directory not found: {path}")]
    PackagesDirNotFound { path: PathBuf },

    /// Package metadata file is missing
    #[error("Package '{package}' has no package.json at '{path}'")]
    MetadataNotFound { package: String, path: PathBuf },

    /// Package metadata file could not be parsed
    #[error("Failed to parse package.json for '{package}': {error}")]
    ParseError { package: String, error: String },

    /// Missing required field
    #[error("Package '{package}' is missing required field '{field}'")]
    MissingField { package: String, field: String },

    /// Requested package is not part of the workspace
    #[error("Package '{name}' not found in '{packages_dir}'")]
    NotFound { name: String, packages_dir: PathBuf },

    /// IO error while reading the packages directory
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Errors raised by the external build engine
///
/// Every variant is an "engine invocation failed" condition; the orchestrator
/// does not distinguish between them.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine executable not found on PATH
    #[error("Build engine '{program}' not found in PATH")]
    NotFound { program: String },

    /// Engine process could not be started or driven
    #[error("Failed to run build engine '{program}': {error}")]
    Spawn { program: String, error: String },

    /// Engine process exited unsuccessfully
    #[error("Build engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// Request could not be encoded for the engine
    #[error("Failed to encode build request: {0}")]
    Encode(String),

    /// Output directory could not be prepared
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Refused to clean a directory outside the package
    #[error("Refusing to clean '{path}': not a subdirectory of package root '{root}'")]
    OutsidePackage { path: PathBuf, root: PathBuf },
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// Config file was requested explicitly but does not exist
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    /// Output directory does not name a subdirectory of the package root
    #[error("Invalid out_dir '{path}': must be a relative subdirectory of the package root")]
    InvalidOutDir { path: PathBuf },
}
