//! Commit-type mapping check
//!
//! Every `presetConfig.types` entry must name a commit `type` and the changelog
//! `section` it lands in. Custom `releaseRules` must use a release type the
//! analyzer knows.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::RelconfResult;
use std::collections::HashSet;

pub struct CommitTypesCheck;

impl Check for CommitTypesCheck {
  fn name(&self) -> &'static str {
    "commit-types"
  }

  fn description(&self) -> &'static str {
    "Validate commit-type to changelog-section mappings and custom release rules"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let plugins = ctx.config.effective_plugins();
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut mapped = 0usize;

    for (plugin_idx, plugin) in plugins.iter().enumerate() {
      let location = format!("plugins[{}] ({})", plugin_idx, plugin.id);

      if let Some(preset) = plugin.option("presetConfig") {
        if !preset.is_object() {
          errors.push(format!("{}: presetConfig must be a mapping, found {}", location, preset));
        } else if preset.get("types").is_some_and(|types| !types.is_array()) {
          errors.push(format!("{}: presetConfig.types must be a list", location));
        }
      }

      if let Some(entries) = plugin.commit_type_entries() {
        let mut seen = HashSet::new();
        for (idx, entry) in entries.into_iter().enumerate() {
          match entry {
            Ok(mapping) => {
              if mapping.commit_type.trim().is_empty() {
                errors.push(format!("{}: types[{}] has an empty `type`", location, idx));
              } else if mapping.section.trim().is_empty() {
                errors.push(format!("{}: types[{}] has an empty `section`", location, idx));
              } else if !seen.insert(mapping.commit_type.clone()) {
                warnings.push(format!(
                  "{}: type '{}' is mapped more than once",
                  location, mapping.commit_type
                ));
              } else {
                mapped += 1;
              }
            }
            Err(reason) => errors.push(format!("{}: types[{}]: {}", location, idx, reason)),
          }
        }
      }

      if let Err(e) = plugin.release_rules() {
        errors.push(format!("{}: releaseRules: {}", location, e));
      }
    }

    if !errors.is_empty() {
      return Ok(
        CheckResult::error(
          self.name(),
          format!("{} invalid commit-type setting(s): {}", errors.len(), errors.join("; ")),
          Some("Each presetConfig.types entry needs both `type` and `section`, e.g. { \"type\": \"fix\", \"section\": \"Fixes\" }"),
        )
        .with_details(serde_json::json!({ "errors": errors, "warnings": warnings })),
      );
    }

    if !warnings.is_empty() {
      return Ok(
        CheckResult::warning(
          self.name(),
          warnings.join("; "),
          Some("Only the first mapping of a commit type is used; remove the others"),
        )
        .with_details(serde_json::json!({ "warnings": warnings })),
      );
    }

    if mapped == 0 {
      Ok(CheckResult::pass(
        self.name(),
        "No custom commit types; the preset's defaults apply",
      ))
    } else {
      Ok(CheckResult::pass(
        self.name(),
        format!("{} commit type(s) mapped to changelog sections", mapped),
      ))
    }
  }
}
