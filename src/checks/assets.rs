//! Release asset check
//!
//! The git step commits every file matching its `assets` globs. A glob that
//! does not compile silently commits nothing, and a changelog that is written
//! but never committed drifts from the released tag.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::RelconfResult;
use crate::core::plugin::KnownPlugin;
use glob::Pattern;

pub struct ReleaseAssetsCheck;

impl Check for ReleaseAssetsCheck {
  fn name(&self) -> &'static str {
    "release-assets"
  }

  fn description(&self) -> &'static str {
    "Validate git asset globs compile and include the changelog file"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let plugins = ctx.config.effective_plugins();

    let Some((git_idx, git)) = plugins.iter().enumerate().find(|(_, p)| p.is(KnownPlugin::Git)) else {
      return Ok(CheckResult::pass(self.name(), "No git step; nothing is committed on release"));
    };

    let options = match git.git_options() {
      Ok(options) => options.unwrap_or_default(),
      Err(e) => {
        return Ok(CheckResult::error(
          self.name(),
          format!("plugins[{}] ({}): invalid options: {}", git_idx, git.id, e),
          Some("`assets` must be a list of path globs, e.g. [\"CHANGELOG.md\", \"**/pom.xml\"]"),
        ));
      }
    };

    let assets = options.effective_assets();
    let mut invalid = Vec::new();
    for asset in &assets {
      if asset.trim().is_empty() {
        invalid.push("empty asset path".to_string());
      } else if let Err(e) = Pattern::new(asset) {
        invalid.push(format!("'{}': {}", asset, e));
      }
    }

    if !invalid.is_empty() {
      return Ok(
        CheckResult::error(
          self.name(),
          format!("Invalid asset glob(s): {}", invalid.join(", ")),
          Some("Fix the glob syntax; unmatched brackets are the usual culprit"),
        )
        .with_details(serde_json::json!({ "assets": assets })),
      );
    }

    let changelog_file = plugins
      .iter()
      .find_map(|p| p.changelog_options().ok().flatten())
      .map(|options| options.changelog_file);

    if let Some(file) = changelog_file
      && !options.commits_file(&file)
    {
      return Ok(
        CheckResult::warning(
          self.name(),
          format!("{} is generated but not among the git assets", file),
          Some(format!("Add \"{}\" to the `assets` of {}", file, KnownPlugin::Git.id())),
        )
        .with_details(serde_json::json!({ "assets": assets })),
      );
    }

    Ok(
      CheckResult::pass(
        self.name(),
        format!("Release commit includes {} asset glob(s)", assets.len()),
      )
      .with_details(serde_json::json!({ "assets": assets })),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::config::{ConfigFormat, ReleaseConfig};

  fn run(json: &str) -> CheckResult {
    let config = ReleaseConfig::from_str(json, ConfigFormat::Json).unwrap();
    ReleaseAssetsCheck.run(&CheckContext::new(config)).unwrap()
  }

  #[test]
  fn test_invalid_glob() {
    let result = run(r#"{"plugins": [["@semantic-release/git", {"assets": ["src/[abc.txt"]}]]}"#);
    assert!(result.is_error());
    assert!(result.message.contains("src/[abc.txt"));
  }

  #[test]
  fn test_assets_must_be_strings() {
    let result = run(r#"{"plugins": [["@semantic-release/git", {"assets": [1, 2]}]]}"#);
    assert!(result.is_error());
  }

  #[test]
  fn test_changelog_not_committed() {
    let result = run(
      r#"{"plugins": [
        ["@semantic-release/changelog", {"changelogFile": "docs/CHANGES.md"}],
        ["@semantic-release/git", {"assets": ["pom.xml"]}]
      ]}"#,
    );
    assert!(result.is_warning());
    assert!(result.message.contains("docs/CHANGES.md"));
  }

  #[test]
  fn test_default_assets_cover_default_changelog() {
    let result = run(r#"{"plugins": ["@semantic-release/changelog", "@semantic-release/git"]}"#);
    assert!(result.passed);
  }

  #[test]
  fn test_no_git_step() {
    assert!(run(r#"{"plugins": ["@semantic-release/changelog"]}"#).passed);
  }
}
