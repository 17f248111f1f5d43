//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, package discovery, and the
//! external bundler process.

pub mod engine;
pub mod filesystem;
pub mod workspace;
