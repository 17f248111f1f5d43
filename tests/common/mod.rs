//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test workspace context
///
/// Creates a temporary monorepo and provides utilities for setting up
/// packages and running the binary against it.
pub struct TestProject {
    /// Temporary directory for the test workspace
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new workspace with an empty `packages/` directory
    pub fn new() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        project.create_dir("packages");
        project
    }

    /// Get the path to the test workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test workspace
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test workspace
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Add a package unit with metadata and an entry file
    pub fn add_package(&self, identifier: &str, declared_name: &str) {
        self.create_file(
            &format!("packages/{identifier}/package.json"),
            &format!(r#"{{ "name": "{declared_name}", "version": "1.0.0" }}"#),
        );
        self.create_file(
            &format!("packages/{identifier}/src/index.ts"),
            "export const version = '1.0.0';\n",
        );
    }

    /// Write `monobuild.toml` selecting `node` as the engine executable
    #[allow(dead_code)]
    pub fn use_engine(&self, node: &str) {
        self.create_file("monobuild.toml", &format!("[engine]\nnode = \"{node}\"\n"));
    }

    /// Run monobuild in the workspace
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    /// Run monobuild in the workspace with extra environment variables
    pub fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_monobuild"));
        cmd.current_dir(self.path());
        cmd.env_remove("MONOBUILD_NODE");
        cmd.env_remove("RUST_LOG");
        cmd.envs(envs.iter().copied());
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute monobuild")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout of a finished command
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
