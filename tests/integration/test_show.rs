//! Tests for the `show` command

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn test_show_plugin_order() -> Result<()> {
  let project = TestProject::new()?;
  run_relconf(&project.path, &["init"])?;

  let output = run_relconf(&project.path, &["show"])?;
  let text = stdout(&output);

  let analyzer = text.find("@semantic-release/commit-analyzer").expect("analyzer listed");
  let changelog = text.find("@semantic-release/changelog").expect("changelog listed");
  let git = text.find("@semantic-release/git").expect("git listed");
  assert!(analyzer < changelog && changelog < git);
  assert!(text.contains("Features (feat)"));
  assert!(text.contains("hidden: docs, build, ci, perf, refactor, test"));

  Ok(())
}

#[test]
fn test_show_json_resolves_channels() -> Result<()> {
  let project = TestProject::with_file(
    ".releaserc",
    r#"
branches:
  - main
  - name: beta
    prerelease: true
  - name: 1.x
    range: 1.x
"#,
  )?;

  let output = run_relconf(&project.path, &["show", "--json"])?;
  let view: Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(view["format"], "yaml");
  assert_eq!(view["default_plugins"], true);

  let branches = view["branches"].as_array().expect("branch list");
  assert_eq!(branches[0]["kind"], "release");
  assert!(branches[0]["channel"].is_null());
  assert_eq!(branches[1]["kind"], "prerelease");
  assert_eq!(branches[1]["channel"], "beta");
  assert_eq!(branches[1]["prerelease_id"], "beta");
  assert_eq!(branches[2]["kind"], "maintenance");
  assert_eq!(branches[2]["range"], "1.x");

  Ok(())
}

#[test]
fn test_show_with_dir_flag() -> Result<()> {
  let project = TestProject::with_file("app/.releaserc.json", r#"{"tagFormat": "app-v${version}"}"#)?;

  let output = run_relconf(&project.path, &["--dir", "app", "show"])?;
  assert!(stdout(&output).contains("Tag format: app-v${version}"));

  Ok(())
}
