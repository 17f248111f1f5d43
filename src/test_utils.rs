//! Test utilities
//!
//! Proptest generators and an in-memory build engine.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use crate::core::builder::BuildEngine;
use crate::core::package::PackageDescriptor;
use crate::core::request::BuildRequest;
use crate::error::EngineError;

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a package directory name (lowercase alphanumeric with hyphens)
    pub fn package_identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,30}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }
}

/// Descriptor for `identifier` rooted under `packages_dir`
///
/// Nothing is written to disk.
pub fn descriptor_in(packages_dir: &Path, identifier: &str) -> PackageDescriptor {
    let root = packages_dir.join(identifier);
    PackageDescriptor {
        identifier: identifier.to_string(),
        entry: root.join("src/index.ts"),
        root,
        declared_name: identifier.to_string(),
    }
}

/// Engine that records requests instead of bundling
///
/// A request is identified by the last component of its package root.
#[derive(Debug, Default)]
pub struct FakeEngine {
    failing: HashSet<String>,
    write_artifacts: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail builds of `identifier`
    #[must_use]
    pub fn failing(mut self, identifier: &str) -> Self {
        self.failing.insert(identifier.to_string());
        self
    }

    /// Write one file per output format, containing `build <call number>`
    #[must_use]
    pub fn writing_artifacts(mut self) -> Self {
        self.write_artifacts = true;
        self
    }

    /// Identifiers built so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildEngine for FakeEngine {
    async fn build(&self, request: &BuildRequest) -> Result<(), EngineError> {
        let identifier = request
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(identifier.clone());
            calls.len()
        };

        if self.failing.contains(&identifier) {
            return Err(EngineError::Failed {
                status: "exit status: 1".to_string(),
                stderr: format!("could not resolve entry for {identifier}"),
            });
        }

        if self.write_artifacts {
            std::fs::create_dir_all(&request.out_dir).unwrap();
            for format in &request.formats {
                std::fs::write(
                    request.out_dir.join(request.file_name_for(*format)),
                    format!("build {call}"),
                )
                .unwrap();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_identifier_generator(name in package_identifier()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
