//! Configuration constants
//!
//! - [`defaults`] - Default layout, framework and plugin values

pub mod defaults;
