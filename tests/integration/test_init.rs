//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn test_init_creates_config() -> Result<()> {
  let project = TestProject::new()?;

  run_relconf(&project.path, &["init", "--server-id", "https://maven.pkg.github.com/acme/widgets"])?;

  assert!(project.file_exists(".releaserc.json"));
  let config: Value = serde_json::from_str(&project.read_file(".releaserc.json")?)?;

  let branches = config["branches"].as_array().expect("branches list");
  assert_eq!(branches[0]["name"], "main");
  assert_eq!(branches[1]["name"], "next");
  assert_eq!(branches[1]["channel"], "next");
  assert_eq!(branches[1]["prerelease"], true);

  let plugins = config["plugins"].as_array().expect("plugins list");
  assert_eq!(plugins.len(), 6);
  assert_eq!(plugins[0][0], "@semantic-release/commit-analyzer");
  assert_eq!(plugins[3][0], "@semantic-release/release-notes-generator");
  assert_eq!(plugins[4][1]["assets"][2], "**/pom.xml");
  assert_eq!(plugins[5][0], "semantic-release-maven");
  assert_eq!(plugins[5][1]["serverId"], "https://maven.pkg.github.com/acme/widgets");

  let types = plugins[3][1]["presetConfig"]["types"].as_array().expect("types list");
  assert_eq!(types.len(), 9);
  assert_eq!(types[0]["type"], "fix");
  assert_eq!(types[0]["section"], "Fixes");
  assert_eq!(types[0]["hidden"], false);

  Ok(())
}

#[test]
fn test_init_then_validate_passes() -> Result<()> {
  let project = TestProject::new()?;

  run_relconf(&project.path, &["init", "--format", "yaml"])?;
  assert!(project.file_exists(".releaserc.yaml"));

  let output = run_relconf(&project.path, &["validate"])?;
  assert!(stdout(&output).contains("All checks passed"));

  Ok(())
}

#[test]
fn test_init_refuses_existing_config() -> Result<()> {
  let project = TestProject::with_file(".releaserc.json", r#"{"branches": ["trunk"]}"#)?;

  let output = run_relconf_raw(&project.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));
  assert!(project.read_file(".releaserc.json")?.contains("trunk"));

  run_relconf(&project.path, &["init", "--force"])?;
  assert!(!project.read_file(".releaserc.json")?.contains("trunk"));

  Ok(())
}

#[test]
fn test_init_into_package_json_keeps_manifest() -> Result<()> {
  let project = TestProject::with_file("package.json", r#"{"name": "widgets", "version": "1.0.0"}"#)?;

  run_relconf(&project.path, &["init", "--format", "package-json"])?;

  let manifest: Value = serde_json::from_str(&project.read_file("package.json")?)?;
  assert_eq!(manifest["name"], "widgets");
  assert!(manifest["release"]["plugins"].is_array());

  Ok(())
}
