//! Build command implementation
//!
//! Implements `monobuild build`: discover packages, resolve their
//! descriptors, and run the orchestrator against the Node.js engine.

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::commands::Workspace;
use crate::cli::output::{create_spinner, status, OutputConfig};
use crate::core::builder::{BuildEvent, FailurePolicy, Orchestrator, RunReport};
use crate::core::package::PackageDescriptor;
use crate::core::profile::Variant;
use crate::core::request::BuildRequest;
use crate::infra::engine::NodeEngine;
use crate::infra::workspace::{discover_packages, select_packages};

/// Build options
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Build only these packages
    pub packages: Vec<String>,
    /// Continue after failures
    pub keep_going: bool,
    /// Print requests instead of building
    pub dry_run: bool,
    /// Node.js executable override
    pub node: Option<String>,
}

/// One entry of `--dry-run` output
#[derive(Debug, Serialize)]
struct PlannedBuild<'a> {
    identifier: &'a str,
    variant: Variant,
    label: String,
    request: BuildRequest,
}

/// Execute the build command
pub async fn execute(
    workspace: &Workspace,
    options: BuildOptions,
    output: OutputConfig,
) -> Result<()> {
    let packages_dir = workspace.packages_dir();
    let identifiers = select_packages(
        discover_packages(&packages_dir)?,
        &options.packages,
        &packages_dir,
    )?;

    let entry = &workspace.config.package.entry;
    let descriptors = identifiers
        .iter()
        .map(|id| PackageDescriptor::load(&packages_dir, id, entry))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to resolve packages")?;

    let node = options
        .node
        .unwrap_or_else(|| workspace.config.engine.node.clone());
    let policy = if options.keep_going {
        FailurePolicy::CollectAll
    } else {
        FailurePolicy::FailFast
    };

    let orchestrator = Orchestrator::new(NodeEngine::new(node, &workspace.root))
        .with_rules(workspace.config.profile_rules())
        .with_layout(workspace.config.output_layout()?)
        .with_policy(policy);

    if options.dry_run {
        let planned: Vec<_> = descriptors
            .iter()
            .map(|descriptor| {
                let (profile, request) = orchestrator.plan(descriptor);
                PlannedBuild {
                    identifier: &descriptor.identifier,
                    variant: profile.variant,
                    label: profile.label,
                    request,
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&planned)?);
        return Ok(());
    }

    if descriptors.is_empty() {
        if output.is_interactive() {
            println!(
                "{} No packages found in {}",
                status::INFO,
                packages_dir.display()
            );
        }
        return Ok(());
    }

    tracing::info!(
        "Building {} packages from {}",
        descriptors.len(),
        packages_dir.display()
    );

    let report = run_with_progress(&orchestrator, &descriptors, output).await;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if output.is_interactive() {
        print_summary(&report);
    }

    if !report.is_success() {
        let failed: Vec<_> = report.failures().map(|o| o.identifier.as_str()).collect();
        bail!("Build failed for: {}", failed.join(", "));
    }

    Ok(())
}

/// Run the orchestrator, printing per-package progress in interactive mode
async fn run_with_progress(
    orchestrator: &Orchestrator<NodeEngine>,
    descriptors: &[PackageDescriptor],
    output: OutputConfig,
) -> RunReport {
    if !output.is_interactive() {
        return orchestrator.run_all(descriptors).await;
    }

    let mut spinner = None;
    orchestrator
        .run_all_observed(descriptors, |event| match event {
            BuildEvent::Started {
                descriptor,
                profile,
            } => {
                println!("Building {} ({})...", descriptor.identifier, profile.label);
                spinner = Some(create_spinner(&format!(
                    "Bundling {}",
                    descriptor.declared_name
                )));
            }
            BuildEvent::Succeeded { outcome } => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
                println!("{} Built {}", status::SUCCESS, outcome.identifier);
            }
            BuildEvent::Failed { outcome } => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
                eprintln!(
                    "{} Failed to build {}: {}",
                    status::ERROR,
                    outcome.identifier,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        })
        .await
}

fn print_summary(report: &RunReport) {
    println!();
    println!(
        "Packages built: {}/{}",
        report.succeeded_count(),
        report.outcomes.len() + report.skipped.len()
    );
    if !report.skipped.is_empty() {
        println!("Not attempted: {}", report.skipped.join(", "));
    }
}
