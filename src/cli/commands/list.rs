//! List command implementation
//!
//! Implements `monobuild list` to show how each package will be built.

use anyhow::Result;
use serde::Serialize;

use crate::cli::commands::Workspace;
use crate::cli::output::OutputConfig;
use crate::core::profile::{PluginSpec, Variant};
use crate::infra::workspace::discover_packages;

#[derive(Debug, Serialize)]
struct ListedPackage {
    identifier: String,
    variant: Variant,
    label: String,
    plugins: Vec<PluginSpec>,
}

/// Execute the list command
pub fn execute(workspace: &Workspace, output: OutputConfig) -> Result<()> {
    let rules = workspace.config.profile_rules();
    let packages: Vec<ListedPackage> = discover_packages(&workspace.packages_dir())?
        .into_iter()
        .map(|identifier| {
            let profile = rules.classify(&identifier);
            ListedPackage {
                identifier,
                variant: profile.variant,
                label: profile.label,
                plugins: profile.plugins,
            }
        })
        .collect();

    if output.json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    if output.quiet {
        return Ok(());
    }

    let width = packages
        .iter()
        .map(|p| p.identifier.len())
        .max()
        .unwrap_or(0);
    for package in &packages {
        let plugins: Vec<String> = package.plugins.iter().map(ToString::to_string).collect();
        println!(
            "{:<width$}  {:<6}  {}",
            package.identifier,
            package.label,
            plugins.join(", ")
        );
    }

    Ok(())
}
