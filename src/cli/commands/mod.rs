//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod list;

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::output::OutputConfig;
use crate::config::defaults::ENV_NODE;
use crate::core::config::WorkspaceConfig;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build package bundles
    Build {
        /// Build only the named package (repeatable)
        #[arg(short, long = "package", value_name = "NAME")]
        packages: Vec<String>,

        /// Keep building after a failure and report every failed package
        #[arg(long)]
        keep_going: bool,

        /// Print the build requests without running the bundler
        #[arg(long)]
        dry_run: bool,

        /// Node.js executable driving the bundler
        #[arg(long, env = ENV_NODE)]
        node: Option<String>,
    },

    /// List packages and the variant each one is built as
    List,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, workspace: &Workspace, output: OutputConfig) -> Result<()> {
        match self {
            Self::Build {
                packages,
                keep_going,
                dry_run,
                node,
            } => {
                let options = build::BuildOptions {
                    packages,
                    keep_going,
                    dry_run,
                    node,
                };
                build::execute(workspace, options, output).await
            }
            Self::List => list::execute(workspace, output),
        }
    }
}

/// Workspace root and its configuration
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Workspace root directory
    pub root: PathBuf,
    /// Loaded configuration
    pub config: WorkspaceConfig,
}

impl Workspace {
    /// Resolve the workspace root and load its configuration
    pub fn open(root: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };

        let config = match config_path {
            Some(path) => WorkspaceConfig::load_from_path(&path)?,
            None => WorkspaceConfig::load(&root)?,
        };

        Ok(Self { root, config })
    }

    /// Absolute packages directory
    pub fn packages_dir(&self) -> PathBuf {
        self.config.packages_dir(&self.root)
    }
}
