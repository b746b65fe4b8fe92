//! Check runner for executing validation checks

use super::trait_def::{Check, CheckContext, CheckResult};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Check runner that executes multiple checks
pub struct CheckRunner {
  checks: Vec<Arc<dyn Check>>,
}

impl CheckRunner {
  /// Create a new check runner
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  /// Add a check to the runner
  pub fn add_check(&mut self, check: Arc<dyn Check>) {
    self.checks.push(check);
  }

  /// Run all checks and collect results
  pub fn run_all(&self, ctx: &CheckContext) -> Result<Vec<CheckResult>> {
    let mut results = Vec::with_capacity(self.checks.len());

    for check in &self.checks {
      let mut result = match check.run(ctx) {
        Ok(result) => {
          debug!(check = check.name(), passed = result.passed, severity = %result.severity, "check finished");
          result
        }
        // If a check itself fails to run, create an error result
        Err(err) => CheckResult::error(
          check.name(),
          format!("Check failed to run: {}", err),
          Some("Re-run with -v for more details"),
        ),
      };

      if !result.passed
        && let Some(source) = &ctx.source
      {
        result = result.with_source(source);
      }
      results.push(result);
    }

    Ok(results)
  }

  /// Get all registered checks
  pub fn checks(&self) -> &[Arc<dyn Check>] {
    &self.checks
  }
}

impl Default for CheckRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a runner with all built-in checks
pub fn create_default_runner() -> CheckRunner {
  let mut runner = CheckRunner::new();

  runner.add_check(Arc::new(super::branches::BranchNamesCheck));
  runner.add_check(Arc::new(super::branches::ReleaseBranchesCheck));
  runner.add_check(Arc::new(super::branches::PrereleaseIdentifiersCheck));
  runner.add_check(Arc::new(super::branches::MaintenanceRangesCheck));
  runner.add_check(Arc::new(super::tag_format::TagFormatCheck));
  runner.add_check(Arc::new(super::plugins::PluginIdsCheck));
  runner.add_check(Arc::new(super::plugins::PluginOrderCheck));
  runner.add_check(Arc::new(super::commit_types::CommitTypesCheck));
  runner.add_check(Arc::new(super::assets::ReleaseAssetsCheck));
  runner.add_check(Arc::new(super::registry::RegistryCheck));

  runner
}
