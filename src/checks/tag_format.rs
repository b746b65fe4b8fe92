//! Tag format check

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::RelconfResult;
use regex::Regex;
use std::sync::LazyLock;

const VERSION_PLACEHOLDER: &str = "${version}";

/// Characters and sequences git refuses in a tag name
static INVALID_REF: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\s~^:?*\[\\]|\.\.|@\{|^/|/$|\.lock$|^\.").expect("ref pattern is valid"));

/// `tagFormat` produces exactly one version per tag and a legal git ref
pub struct TagFormatCheck;

impl Check for TagFormatCheck {
  fn name(&self) -> &'static str {
    "tag-format"
  }

  fn description(&self) -> &'static str {
    "Validate tagFormat contains ${version} exactly once and renders a legal git tag"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let format = ctx.config.tag_format_or_default();
    let occurrences = format.matches(VERSION_PLACEHOLDER).count();

    if occurrences != 1 {
      return Ok(CheckResult::error(
        self.name(),
        format!(
          "tagFormat '{}' must contain {} exactly once, found it {} time(s)",
          format, VERSION_PLACEHOLDER, occurrences
        ),
        Some("Use a format such as `v${version}`"),
      ));
    }

    let sample = format.replace(VERSION_PLACEHOLDER, "1.0.0");
    if INVALID_REF.is_match(&sample) {
      return Ok(
        CheckResult::error(
          self.name(),
          format!("tagFormat '{}' renders '{}', which is not a valid git tag", format, sample),
          Some("Remove whitespace and the characters ~ ^ : ? * [ \\ from tagFormat"),
        )
        .with_details(serde_json::json!({ "sample": sample })),
      );
    }

    Ok(CheckResult::pass(self.name(), format!("Tags look like '{}'", sample)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::config::ReleaseConfig;

  fn run(format: Option<&str>) -> CheckResult {
    let config = ReleaseConfig {
      tag_format: format.map(str::to_string),
      ..Default::default()
    };
    TagFormatCheck.run(&CheckContext::new(config)).unwrap()
  }

  #[test]
  fn test_default_format_passes() {
    let result = run(None);
    assert!(result.passed);
    assert!(result.message.contains("v1.0.0"));
  }

  #[test]
  fn test_placeholder_count() {
    assert!(run(Some("release")).is_error());
    assert!(run(Some("${version}-${version}")).is_error());
    assert!(run(Some("widgets@${version}")).passed);
  }

  #[test]
  fn test_illegal_ref() {
    assert!(run(Some("release ${version}")).is_error());
    assert!(run(Some("v${version}..x")).is_error());
    assert!(run(Some("v${version}.lock")).is_error());
  }
}
