//! Tests for the `validate` command

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn test_validate_missing_config() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_relconf_raw(&project.path, &["validate"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("relconf init"));

  Ok(())
}

#[test]
fn test_validate_duplicate_branch_fails() -> Result<()> {
  let project = TestProject::with_file(
    ".releaserc.json",
    r#"{"branches": ["main", {"name": "main"}], "plugins": ["@semantic-release/commit-analyzer"]}"#,
  )?;

  let output = run_relconf_raw(&project.path, &["validate"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stdout(&output).contains("declared more than once: main"));

  Ok(())
}

#[test]
fn test_validate_commit_type_without_section() -> Result<()> {
  let project = TestProject::with_file(
    ".releaserc.yml",
    r#"
branches: [main]
plugins:
  - "@semantic-release/commit-analyzer"
  - - "@semantic-release/release-notes-generator"
    - presetConfig:
        types:
          - type: feat
            section: Features
          - type: fix
"#,
  )?;

  let output = run_relconf_raw(&project.path, &["validate", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let results: Value = serde_json::from_str(&stdout(&output))?;
  let commit_types = results
    .as_array()
    .expect("result list")
    .iter()
    .find(|r| r["check_name"] == "commit-types")
    .expect("commit-types result");
  assert_eq!(commit_types["passed"], false);
  assert_eq!(commit_types["severity"], "Error");

  Ok(())
}

#[test]
fn test_validate_json_lists_every_check() -> Result<()> {
  let project = TestProject::new()?;
  run_relconf(&project.path, &["init"])?;

  let output = run_relconf(&project.path, &["validate", "--json"])?;
  let results: Value = serde_json::from_str(&stdout(&output))?;
  let names: Vec<&str> = results
    .as_array()
    .expect("result list")
    .iter()
    .filter_map(|r| r["check_name"].as_str())
    .collect();

  assert_eq!(
    names,
    [
      "branch-names",
      "release-branches",
      "prerelease-identifiers",
      "maintenance-ranges",
      "tag-format",
      "plugin-ids",
      "plugin-order",
      "commit-types",
      "release-assets",
      "registry",
    ]
  );

  Ok(())
}

#[test]
fn test_validate_strict_fails_on_warning() -> Result<()> {
  let project = TestProject::with_file(
    ".releaserc.json",
    r#"{"branches": ["main"], "plugins": ["@semantic-release/commit-analyzer", "@semantic-release/commit-analyzer"]}"#,
  )?;

  run_relconf(&project.path, &["validate"])?;

  let output = run_relconf_raw(&project.path, &["validate", "--strict"])?;
  assert_eq!(output.status.code(), Some(3));

  Ok(())
}

#[test]
fn test_validate_explicit_config_path() -> Result<()> {
  let project = TestProject::with_file("ci/release.toml", "branches = [\"main\"]\n")?;

  let output = run_relconf(&project.path, &["--config", "ci/release.toml", "validate"])?;
  assert!(stdout(&output).contains("release.toml (toml)"));

  Ok(())
}

#[test]
fn test_validate_js_config_unsupported() -> Result<()> {
  let project = TestProject::with_file("release.config.js", "module.exports = { branches: ['main'] };\n")?;

  let output = run_relconf_raw(&project.path, &["validate"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("JavaScript"));

  Ok(())
}

#[test]
fn test_validate_list_needs_no_config() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_relconf(&project.path, &["validate", "--list"])?;
  let text = stdout(&output);
  assert!(text.contains("maintenance-ranges"));
  assert!(text.contains("Validate tagFormat contains ${version} exactly once"));

  let output = run_relconf(&project.path, &["validate", "--list", "--json"])?;
  let catalog: Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(catalog.as_array().expect("check list").len(), 10);
  assert_eq!(catalog[0]["name"], "branch-names");

  Ok(())
}

#[test]
fn test_validate_json_names_the_source_file() -> Result<()> {
  let project = TestProject::with_file(".releaserc.json", r#"{"branches": [], "tagFormat": "v${version}"}"#)?;

  let output = run_relconf_raw(&project.path, &["validate", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let results: Value = serde_json::from_str(&stdout(&output))?;
  let release = results
    .as_array()
    .expect("result list")
    .iter()
    .find(|r| r["check_name"] == "release-branches")
    .expect("release-branches result");
  assert_eq!(release["passed"], false);
  assert!(release["details"]["source"].as_str().expect("source path").ends_with(".releaserc.json"));

  Ok(())
}
