//! Tests for the `convert` command

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn test_convert_to_stdout_preserves_order() -> Result<()> {
  let project = TestProject::new()?;
  run_relconf(&project.path, &["init"])?;

  let output = run_relconf(&project.path, &["convert", "--to", "yaml"])?;
  let yaml = stdout(&output);

  let analyzer = yaml.find("commit-analyzer").expect("analyzer present");
  let github = yaml.find("@semantic-release/github").expect("github present");
  let maven = yaml.find("semantic-release-maven").expect("maven present");
  assert!(analyzer < github && github < maven);
  assert!(!project.file_exists(".releaserc.yaml"));

  Ok(())
}

#[test]
fn test_convert_yaml_to_json_file() -> Result<()> {
  let project = TestProject::with_file(
    ".releaserc.yaml",
    r#"
branches: [main]
plugins:
  - "@semantic-release/commit-analyzer"
  - - "@semantic-release/git"
    - assets: [CHANGELOG.md]
successComment: false
"#,
  )?;

  run_relconf(&project.path, &["convert", "--to", "json", "--output", "out.json"])?;

  let converted: Value = serde_json::from_str(&project.read_file("out.json")?)?;
  assert_eq!(converted["branches"][0], "main");
  assert_eq!(converted["plugins"][0], "@semantic-release/commit-analyzer");
  assert_eq!(converted["plugins"][1][1]["assets"][0], "CHANGELOG.md");
  assert_eq!(converted["successComment"], false);

  Ok(())
}

#[test]
fn test_convert_refuses_to_overwrite() -> Result<()> {
  let project = TestProject::with_file(".releaserc.json", r#"{"branches": ["main"]}"#)?;
  project.write_file("out.toml", "# keep me\n")?;

  let output = run_relconf_raw(&project.path, &["convert", "--to", "toml", "--output", "out.toml"])?;
  assert_eq!(output.status.code(), Some(1));
  assert_eq!(project.read_file("out.toml")?, "# keep me\n");

  run_relconf(&project.path, &["convert", "--to", "toml", "--output", "out.toml", "--force"])?;
  assert!(project.read_file("out.toml")?.contains("main"));

  Ok(())
}
