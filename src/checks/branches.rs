//! Branch checks
//!
//! Branch names must be unique, there must be one to three release branches,
//! prerelease identifiers must be valid semver prerelease tags, and
//! maintenance branches must name a range.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::branch::{BranchKind, is_maintenance_range};
use crate::core::error::RelconfResult;
use std::collections::{HashMap, HashSet};

const NO_BRANCHES: &str = "No branches declared; the engine's default branch set applies";

/// Branch names are present and unique
pub struct BranchNamesCheck;

impl Check for BranchNamesCheck {
  fn name(&self) -> &'static str {
    "branch-names"
  }

  fn description(&self) -> &'static str {
    "Validate that every branch has a name and no name is declared twice"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let branches = ctx.config.declared_branches();
    if branches.is_empty() {
      return Ok(CheckResult::pass(self.name(), NO_BRANCHES));
    }

    let blank: Vec<usize> = branches
      .iter()
      .enumerate()
      .filter(|(_, entry)| entry.name().trim().is_empty())
      .map(|(idx, _)| idx)
      .collect();
    if !blank.is_empty() {
      return Ok(
        CheckResult::error(
          self.name(),
          format!("{} branch entr(ies) have an empty name", blank.len()),
          Some("Give every entry under `branches` a non-empty `name`"),
        )
        .with_details(serde_json::json!({ "indices": blank })),
      );
    }

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for entry in branches {
      if !seen.insert(entry.name()) && !duplicates.contains(&entry.name()) {
        duplicates.push(entry.name());
      }
    }

    if duplicates.is_empty() {
      Ok(CheckResult::pass(
        self.name(),
        format!("{} branch(es) declared, all names unique", branches.len()),
      ))
    } else {
      Ok(
        CheckResult::error(
          self.name(),
          format!("Branch name(s) declared more than once: {}", duplicates.join(", ")),
          Some("Merge the duplicate entries into a single branch rule"),
        )
        .with_details(serde_json::json!({ "duplicates": duplicates })),
      )
    }
  }
}

/// Between one and three release branches
pub struct ReleaseBranchesCheck;

const MAX_RELEASE_BRANCHES: usize = 3;

impl Check for ReleaseBranchesCheck {
  fn name(&self) -> &'static str {
    "release-branches"
  }

  fn description(&self) -> &'static str {
    "Validate that one to three release branches are declared"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    match &ctx.config.branches {
      None => return Ok(CheckResult::pass(self.name(), NO_BRANCHES)),
      Some(branches) if branches.is_empty() => {
        return Ok(CheckResult::error(
          self.name(),
          "`branches` is an empty list, so no release can be cut from any branch",
          Some("Remove the `branches` key to use the engine's defaults, or list at least one branch"),
        ));
      }
      Some(_) => {}
    }
    let resolved = ctx.config.resolved_branches();

    let release: Vec<&str> = resolved
      .iter()
      .filter(|b| b.kind == BranchKind::Release)
      .map(|b| b.name.as_str())
      .collect();

    if release.is_empty() {
      return Ok(CheckResult::error(
        self.name(),
        "No release branch declared; every branch is a prerelease or maintenance branch",
        Some("Add a branch without `prerelease` and `range`, e.g. { \"name\": \"main\" }"),
      ));
    }

    if release.len() > MAX_RELEASE_BRANCHES {
      return Ok(
        CheckResult::error(
          self.name(),
          format!(
            "{} release branches declared, at most {} are allowed",
            release.len(),
            MAX_RELEASE_BRANCHES
          ),
          Some("Turn the extra branches into prerelease or maintenance branches"),
        )
        .with_details(serde_json::json!({ "release_branches": release })),
      );
    }

    Ok(CheckResult::pass(
      self.name(),
      format!(
        "Release branch(es): {} (default channel: {})",
        release.join(", "),
        release[0]
      ),
    ))
  }
}

/// Prerelease identifiers are valid and distinct
pub struct PrereleaseIdentifiersCheck;

impl Check for PrereleaseIdentifiersCheck {
  fn name(&self) -> &'static str {
    "prerelease-identifiers"
  }

  fn description(&self) -> &'static str {
    "Validate prerelease identifiers are valid semver and unique across branches"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let prereleases: Vec<(String, String)> = ctx
      .config
      .resolved_branches()
      .into_iter()
      .filter(|b| b.kind == BranchKind::Prerelease)
      .filter_map(|b| b.prerelease_id.map(|id| (b.name, id)))
      .collect();

    if prereleases.is_empty() {
      return Ok(CheckResult::pass(self.name(), "No prerelease branches declared"));
    }

    let invalid: Vec<String> = prereleases
      .iter()
      .filter(|(_, id)| id.is_empty() || semver::Prerelease::new(id).is_err())
      .map(|(branch, id)| format!("{} ('{}')", branch, id))
      .collect();
    if !invalid.is_empty() {
      return Ok(CheckResult::error(
        self.name(),
        format!("Invalid prerelease identifier(s): {}", invalid.join(", ")),
        Some("Identifiers may only contain ASCII alphanumerics, hyphens and dots, e.g. `beta` or `rc.1`"),
      ));
    }

    let mut by_id: HashMap<&str, Vec<&str>> = HashMap::new();
    for (branch, id) in &prereleases {
      by_id.entry(id.as_str()).or_default().push(branch.as_str());
    }
    let mut clashes: Vec<String> = by_id
      .iter()
      .filter(|(_, branches)| branches.len() > 1)
      .map(|(id, branches)| format!("'{}' used by {}", id, branches.join(", ")))
      .collect();
    clashes.sort();

    if clashes.is_empty() {
      let ids: Vec<&str> = prereleases.iter().map(|(_, id)| id.as_str()).collect();
      Ok(CheckResult::pass(
        self.name(),
        format!("Prerelease identifier(s): {}", ids.join(", ")),
      ))
    } else {
      Ok(CheckResult::error(
        self.name(),
        format!("Prerelease identifiers must be unique: {}", clashes.join("; ")),
        Some("Give each prerelease branch its own `prerelease` identifier"),
      ))
    }
  }
}

/// Maintenance branches carry a usable range
pub struct MaintenanceRangesCheck;

impl Check for MaintenanceRangesCheck {
  fn name(&self) -> &'static str {
    "maintenance-ranges"
  }

  fn description(&self) -> &'static str {
    "Validate maintenance branch ranges are N.x, N.N.x or N.x.x and not shared"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let maintenance: Vec<(String, String)> = ctx
      .config
      .resolved_branches()
      .into_iter()
      .filter_map(|b| b.range.map(|range| (b.name, range)))
      .collect();

    if maintenance.is_empty() {
      return Ok(CheckResult::pass(self.name(), "No maintenance branches declared"));
    }

    let invalid: Vec<String> = maintenance
      .iter()
      .filter(|(_, range)| !is_maintenance_range(range))
      .map(|(branch, range)| format!("{} ('{}')", branch, range))
      .collect();

    if !invalid.is_empty() {
      return Ok(CheckResult::error(
        self.name(),
        format!("Invalid maintenance range(s): {}", invalid.join(", ")),
        Some("Use a range such as `1.x`, `1.2.x` or `1.x.x`"),
      ));
    }

    let mut seen = HashSet::new();
    let overlapping: Vec<&str> = maintenance
      .iter()
      .filter(|(_, range)| !seen.insert(range.as_str()))
      .map(|(branch, _)| branch.as_str())
      .collect();

    if overlapping.is_empty() {
      Ok(CheckResult::pass(
        self.name(),
        format!("{} maintenance branch(es) with valid ranges", maintenance.len()),
      ))
    } else {
      Ok(CheckResult::error(
        self.name(),
        format!("Maintenance branch(es) repeat a range already covered: {}", overlapping.join(", ")),
        Some("Each maintenance branch must own a distinct range"),
      ))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::checks::Severity;
  use crate::core::config::{ConfigFormat, ReleaseConfig};

  fn ctx(json: &str) -> CheckContext {
    CheckContext::new(ReleaseConfig::from_str(json, ConfigFormat::Json).unwrap())
  }

  #[test]
  fn test_duplicate_branch_names() {
    let ctx = ctx(r#"{"branches": ["main", {"name": "main", "channel": "x"}, "next"]}"#);
    let result = BranchNamesCheck.run(&ctx).unwrap();
    assert!(result.is_error());
    assert!(result.message.contains("main"));
  }

  #[test]
  fn test_blank_branch_name() {
    let ctx = ctx(r#"{"branches": ["main", " "]}"#);
    assert!(BranchNamesCheck.run(&ctx).unwrap().is_error());
  }

  #[test]
  fn test_unique_branch_names() {
    let ctx = ctx(r#"{"branches": ["main", "next"]}"#);
    assert!(BranchNamesCheck.run(&ctx).unwrap().passed);
  }

  #[test]
  fn test_release_branch_count() {
    let none = ctx(r#"{"branches": [{"name": "beta", "prerelease": true}, "1.x"]}"#);
    assert!(ReleaseBranchesCheck.run(&none).unwrap().is_error());

    let too_many = ctx(r#"{"branches": ["a", "b", "c", "d"]}"#);
    let result = ReleaseBranchesCheck.run(&too_many).unwrap();
    assert_eq!(result.severity, Severity::Error);
    assert!(result.message.contains("4 release branches"));

    let ok = ctx(r#"{"branches": ["main", "next", {"name": "beta", "prerelease": true}]}"#);
    assert!(ReleaseBranchesCheck.run(&ok).unwrap().passed);
  }

  #[test]
  fn test_prerelease_identifiers() {
    let bad = ctx(r#"{"branches": ["main", {"name": "beta", "prerelease": "rc_${name}"}]}"#);
    assert!(PrereleaseIdentifiersCheck.run(&bad).unwrap().is_error());

    let clash = ctx(
      r#"{"branches": ["main", {"name": "beta", "prerelease": "rc"}, {"name": "gamma", "prerelease": "rc"}]}"#,
    );
    let result = PrereleaseIdentifiersCheck.run(&clash).unwrap();
    assert!(result.is_error());
    assert!(result.message.contains("beta, gamma"));

    let ok = ctx(r#"{"branches": ["main", {"name": "beta", "prerelease": "rc.${name}"}]}"#);
    let result = PrereleaseIdentifiersCheck.run(&ok).unwrap();
    assert!(result.passed);
    assert!(result.message.contains("rc.beta"));
  }

  #[test]
  fn test_maintenance_ranges() {
    let bad = ctx(r#"{"branches": ["main", {"name": "legacy", "range": "the old one"}]}"#);
    assert!(MaintenanceRangesCheck.run(&bad).unwrap().is_error());

    let overlap = ctx(r#"{"branches": ["main", "1.x", {"name": "legacy", "range": "1.x"}]}"#);
    let result = MaintenanceRangesCheck.run(&overlap).unwrap();
    assert!(result.is_error());
    assert!(result.message.contains("legacy"));

    for range in ["*", ">=1.0.0", "^2"] {
      let json = format!(r#"{{"branches": ["main", {{"name": "old", "range": "{}"}}]}}"#, range);
      assert!(MaintenanceRangesCheck.run(&ctx(&json)).unwrap().is_error(), "range {} accepted", range);
    }

    let ok = ctx(r#"{"branches": ["main", "1.x", "2.1.x"]}"#);
    assert!(MaintenanceRangesCheck.run(&ok).unwrap().passed);
  }

  #[test]
  fn test_explicit_empty_branches_fail() {
    let ctx = ctx(r#"{"branches": []}"#);
    assert!(BranchNamesCheck.run(&ctx).unwrap().passed);
    let result = ReleaseBranchesCheck.run(&ctx).unwrap();
    assert!(result.is_error());
    assert!(result.message.contains("empty list"));
  }

  #[test]
  fn test_empty_prerelease_identifier_rejected() {
    let ctx = ctx(r#"{"branches": ["main", {"name": "beta", "prerelease": ""}]}"#);
    let result = PrereleaseIdentifiersCheck.run(&ctx).unwrap();
    assert!(result.is_error());
    assert!(result.message.contains("beta"));
  }

  #[test]
  fn test_no_branches_passes() {
    let ctx = ctx("{}");
    assert!(BranchNamesCheck.run(&ctx).unwrap().passed);
    assert!(ReleaseBranchesCheck.run(&ctx).unwrap().passed);
  }
}
