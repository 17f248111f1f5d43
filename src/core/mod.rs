//! Core business logic module
//!
//! # Submodules
//!
//! - [`profile`] - Variant classification and plugin selection
//! - [`package`] - Package descriptors and `package.json` metadata
//! - [`request`] - Build request assembly
//! - [`builder`] - Build orchestration and the engine boundary
//! - [`config`] - Workspace configuration (`monobuild.toml`)

pub mod builder;
pub mod config;
pub mod package;
pub mod profile;
pub mod request;
