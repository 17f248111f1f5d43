//! Monobuild - library bundle orchestrator for monorepos
//!
//! Builds every package of a monorepo as a library bundle, choosing the
//! framework compatibility plugins for each package from its directory name
//! and delegating the bundling itself to an external engine.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Classification, request assembly, orchestration
//! - [`infra`] - Infrastructure layer (filesystem, discovery, engine process)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
