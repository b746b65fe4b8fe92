//! Plugin pipeline checks
//!
//! Plugin order is execution order in the engine, so these checks look at the
//! list as a pipeline: identifiers must be usable, something must analyze
//! commits, and the changelog has to exist before the release commit is made.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::RelconfResult;
use crate::core::plugin::{KnownPlugin, PluginEntry};
use std::collections::HashSet;

/// Plugin identifiers are present and not repeated
pub struct PluginIdsCheck;

impl Check for PluginIdsCheck {
  fn name(&self) -> &'static str {
    "plugin-ids"
  }

  fn description(&self) -> &'static str {
    "Validate plugin identifiers are non-empty and each plugin is listed once"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let Some(plugins) = &ctx.config.plugins else {
      return Ok(CheckResult::pass(
        self.name(),
        "No plugins declared; the engine's default pipeline applies",
      ));
    };

    let blank: Vec<usize> = plugins
      .iter()
      .enumerate()
      .filter(|(_, p)| p.id.trim().is_empty())
      .map(|(idx, _)| idx)
      .collect();
    if !blank.is_empty() {
      return Ok(
        CheckResult::error(
          self.name(),
          format!("{} plugin entr(ies) have an empty identifier", blank.len()),
          Some("Every plugin entry needs the package name of the plugin"),
        )
        .with_details(serde_json::json!({ "indices": blank })),
      );
    }

    let mut seen = HashSet::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for plugin in plugins {
      if !seen.insert(plugin.id.as_str()) && !duplicates.contains(&plugin.id.as_str()) {
        duplicates.push(&plugin.id);
      }
    }

    let third_party: Vec<&str> = plugins
      .iter()
      .filter(|p| p.known().is_none())
      .map(|p| p.id.as_str())
      .collect();

    if !duplicates.is_empty() {
      return Ok(
        CheckResult::warning(
          self.name(),
          format!("Plugin(s) listed more than once: {}", duplicates.join(", ")),
          Some("Each listed entry runs separately; merge the options into one entry unless that is intended"),
        )
        .with_details(serde_json::json!({ "duplicates": duplicates })),
      );
    }

    let mut message = format!("{} plugin(s) declared", plugins.len());
    if !third_party.is_empty() {
      message.push_str(&format!(
        ", {} resolved by the engine only: {}",
        third_party.len(),
        third_party.join(", ")
      ));
    }

    Ok(CheckResult::pass(self.name(), message).with_details(serde_json::json!({ "third_party": third_party })))
  }
}

/// The pipeline order makes sense for the engine's lifecycle
pub struct PluginOrderCheck;

impl PluginOrderCheck {
  /// Changelog file the changelog plugin writes, if it is in the pipeline
  fn changelog(plugins: &[PluginEntry]) -> Option<(usize, String)> {
    plugins.iter().enumerate().find_map(|(idx, plugin)| {
      let options = plugin.changelog_options().ok()??;
      Some((idx, options.changelog_file))
    })
  }
}

impl Check for PluginOrderCheck {
  fn name(&self) -> &'static str {
    "plugin-order"
  }

  fn description(&self) -> &'static str {
    "Validate a commit analyzer is present and the changelog is written before the release commit"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let plugins = ctx.config.effective_plugins();
    let pipeline: Vec<&str> = plugins.iter().map(|p| p.id.as_str()).collect();

    if !plugins.iter().any(PluginEntry::analyzes_commits) {
      let unknown: Vec<&str> = plugins
        .iter()
        .filter(|p| p.known().is_none())
        .map(|p| p.id.as_str())
        .collect();
      let suggestion = Some(format!(
        "Add {} as the first plugin",
        KnownPlugin::CommitAnalyzer.id()
      ));

      let result = if unknown.is_empty() {
        CheckResult::error(
          self.name(),
          "No plugin analyzes commits, so no release type can ever be determined",
          suggestion,
        )
      } else {
        CheckResult::warning(
          self.name(),
          format!(
            "No known commit analyzer; one of {} must implement commit analysis",
            unknown.join(", ")
          ),
          suggestion,
        )
      };
      return Ok(result.with_details(serde_json::json!({ "pipeline": pipeline })));
    }

    if let Some((changelog_idx, changelog_file)) = Self::changelog(&plugins) {
      let git = plugins
        .iter()
        .enumerate()
        .find_map(|(idx, p)| p.git_options().ok().flatten().map(|options| (idx, options)));

      if let Some((git_idx, git_options)) = git
        && git_idx < changelog_idx
        && git_options.commits_file(&changelog_file)
      {
        return Ok(
          CheckResult::warning(
            self.name(),
            format!(
              "{} runs before {}, so the release commit picks up the previous {}",
              KnownPlugin::Git.id(),
              KnownPlugin::Changelog.id(),
              changelog_file
            ),
            Some(format!(
              "Move {} above {} in `plugins`",
              KnownPlugin::Changelog.id(),
              KnownPlugin::Git.id()
            )),
          )
          .with_details(serde_json::json!({ "pipeline": pipeline })),
        );
      }
    }

    Ok(
      CheckResult::pass(self.name(), format!("Pipeline: {}", pipeline.join(" → ")))
        .with_details(serde_json::json!({ "pipeline": pipeline })),
    )
  }
}
