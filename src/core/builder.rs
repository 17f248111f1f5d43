//! Build orchestration logic
//!
//! Coordinates the build process across multiple packages: classify each
//! package, assemble its request, hand it to the [`BuildEngine`], and record
//! the outcome. Packages are built one at a time in input order.

use async_trait::async_trait;
use serde::Serialize;

use crate::core::package::PackageDescriptor;
use crate::core::profile::{BuildProfile, ProfileRules, Variant};
use crate::core::request::{BuildRequest, OutputLayout};
use crate::error::{EngineError, FilesystemError};
use crate::infra::filesystem;

/// External bundler boundary
///
/// Implementations perform one library build for the given request and
/// report completion. Any failure is an engine invocation failure.
#[async_trait]
pub trait BuildEngine: Send + Sync {
    /// Build one package
    async fn build(&self, request: &BuildRequest) -> Result<(), EngineError>;
}

/// What to do after a package fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failure; later packages are not attempted
    #[default]
    FailFast,
    /// Attempt every package and report all failures
    CollectAll,
}

/// Result of building one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    /// Package identifier
    pub identifier: String,
    /// Variant the package was built as
    pub variant: Variant,
    /// Whether the engine completed successfully
    pub succeeded: bool,
    /// Engine error message, if the build failed
    pub error: Option<String>,
}

impl BuildOutcome {
    fn success(identifier: &str, variant: Variant) -> Self {
        Self {
            identifier: identifier.to_string(),
            variant,
            succeeded: true,
            error: None,
        }
    }

    fn failure(identifier: &str, variant: Variant, error: &EngineError) -> Self {
        Self {
            identifier: identifier.to_string(),
            variant,
            succeeded: false,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregated result of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Outcomes of every attempted package, in input order
    pub outcomes: Vec<BuildOutcome>,
    /// Identifier of the package that stopped a fail-fast run
    pub stopped_at: Option<String>,
    /// Packages never attempted because the run stopped
    pub skipped: Vec<String>,
}

impl RunReport {
    /// True when every attempted package built and none were skipped
    pub fn is_success(&self) -> bool {
        self.skipped.is_empty() && self.outcomes.iter().all(|o| o.succeeded)
    }

    /// Failed outcomes
    pub fn failures(&self) -> impl Iterator<Item = &BuildOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }

    /// Number of packages that built
    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }
}

/// Progress notifications emitted during a run
#[derive(Debug)]
pub enum BuildEvent<'a> {
    /// A package is about to be handed to the engine
    Started {
        descriptor: &'a PackageDescriptor,
        profile: &'a BuildProfile,
    },
    /// A package built successfully
    Succeeded { outcome: &'a BuildOutcome },
    /// A package failed to build
    Failed { outcome: &'a BuildOutcome },
}

/// Build orchestrator
#[derive(Debug)]
pub struct Orchestrator<E> {
    engine: E,
    rules: ProfileRules,
    layout: OutputLayout,
    policy: FailurePolicy,
}

impl<E: BuildEngine> Orchestrator<E> {
    /// Create an orchestrator with default rules, layout, and fail-fast policy
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            rules: ProfileRules::default(),
            layout: OutputLayout::default(),
            policy: FailurePolicy::default(),
        }
    }

    /// Set the classification rules
    #[must_use]
    pub fn with_rules(mut self, rules: ProfileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the output layout
    #[must_use]
    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the failure policy
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The engine requests are sent to
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Classify a package and assemble its request without building
    pub fn plan(&self, descriptor: &PackageDescriptor) -> (BuildProfile, BuildRequest) {
        let profile = self.rules.classify(&descriptor.identifier);
        let request = BuildRequest::assemble(descriptor, &profile, &self.layout);
        (profile, request)
    }

    /// Build a single package
    pub async fn build_one(&self, descriptor: &PackageDescriptor) -> BuildOutcome {
        let (profile, request) = self.plan(descriptor);
        self.execute(descriptor, &profile, &request).await
    }

    /// Build every package with no progress reporting
    pub async fn run_all(&self, descriptors: &[PackageDescriptor]) -> RunReport {
        self.run_all_observed(descriptors, |_| {}).await
    }

    /// Build every package in order, reporting progress to `observer`
    pub async fn run_all_observed<F>(
        &self,
        descriptors: &[PackageDescriptor],
        mut observer: F,
    ) -> RunReport
    where
        F: FnMut(&BuildEvent<'_>),
    {
        let mut report = RunReport::default();

        for (index, descriptor) in descriptors.iter().enumerate() {
            let (profile, request) = self.plan(descriptor);
            observer(&BuildEvent::Started {
                descriptor,
                profile: &profile,
            });

            let outcome = self.execute(descriptor, &profile, &request).await;
            let failed = !outcome.succeeded;

            if failed {
                observer(&BuildEvent::Failed { outcome: &outcome });
            } else {
                observer(&BuildEvent::Succeeded { outcome: &outcome });
            }
            report.outcomes.push(outcome);

            if failed && self.policy == FailurePolicy::FailFast {
                report.stopped_at = Some(descriptor.identifier.clone());
                report.skipped = descriptors[index + 1..]
                    .iter()
                    .map(|d| d.identifier.clone())
                    .collect();
                if !report.skipped.is_empty() {
                    tracing::info!(
                        "Stopping after '{}', {} package(s) not built",
                        descriptor.identifier,
                        report.skipped.len()
                    );
                }
                break;
            }
        }

        report
    }

    async fn execute(
        &self,
        descriptor: &PackageDescriptor,
        profile: &BuildProfile,
        request: &BuildRequest,
    ) -> BuildOutcome {
        tracing::info!(
            "Building package: {} ({})",
            descriptor.identifier,
            profile.label
        );
        tracing::debug!(?request, "Assembled build request");

        match self.invoke(request).await {
            Ok(()) => {
                tracing::info!("Built package: {}", descriptor.identifier);
                BuildOutcome::success(&descriptor.identifier, profile.variant)
            }
            Err(e) => {
                tracing::debug!("Build failed for package '{}': {e}", descriptor.identifier);
                BuildOutcome::failure(&descriptor.identifier, profile.variant, &e)
            }
        }
    }

    async fn invoke(&self, request: &BuildRequest) -> Result<(), EngineError> {
        if request.empty_out_dir {
            if !request.out_dir_within_root() {
                return Err(FilesystemError::OutsidePackage {
                    path: request.out_dir.clone(),
                    root: request.root.clone(),
                }
                .into());
            }
            filesystem::empty_dir(&request.out_dir)?;
        }
        self.engine.build(request).await
    }
}
