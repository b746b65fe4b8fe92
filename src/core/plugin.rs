//! Plugin entries and typed views over their options
//!
//! The `plugins` list accepts three shapes per entry and relconf keeps track of
//! which one was used so a load/save cycle writes the file back the same way:
//!
//! ```json
//! "plugins": [
//!   "@semantic-release/github",
//!   ["@semantic-release/commit-analyzer"],
//!   ["@semantic-release/git", { "assets": ["CHANGELOG.md"] }]
//! ]
//! ```
//!
//! Options are held as an insertion-ordered JSON object. Plugins relconf knows
//! about get typed views on top of that object; third-party plugins keep their
//! options opaque.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Options mapping attached to a plugin entry
pub type PluginOptions = serde_json::Map<String, Value>;

/// How an entry was written in the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryShape {
  /// `"id"`
  #[default]
  Bare,
  /// `["id"]`
  Single,
  /// `["id", { ... }]`
  Pair,
}

/// One entry of the `plugins` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPluginEntry", into = "RawPluginEntry")]
pub struct PluginEntry {
  pub id: String,
  pub options: Option<PluginOptions>,
  pub shape: EntryShape,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPluginEntry {
  Bare(String),
  Wrapped(Vec<Value>),
}

impl TryFrom<RawPluginEntry> for PluginEntry {
  type Error = String;

  fn try_from(raw: RawPluginEntry) -> Result<Self, Self::Error> {
    match raw {
      RawPluginEntry::Bare(id) => Ok(PluginEntry::new(id)),
      RawPluginEntry::Wrapped(items) => {
        let mut items = items.into_iter();
        let id = match items.next() {
          Some(Value::String(id)) => id,
          Some(other) => return Err(format!("plugin identifier must be a string, found {}", other)),
          None => return Err("plugin entry is an empty list".to_string()),
        };

        let (options, shape) = match items.next() {
          None => (None, EntryShape::Single),
          Some(Value::Object(map)) => (Some(map), EntryShape::Pair),
          Some(other) => {
            return Err(format!("options for plugin '{}' must be a mapping, found {}", id, other));
          }
        };

        if items.next().is_some() {
          return Err(format!("plugin entry '{}' has more than two elements", id));
        }

        Ok(PluginEntry { id, options, shape })
      }
    }
  }
}

impl From<PluginEntry> for RawPluginEntry {
  fn from(entry: PluginEntry) -> Self {
    match (entry.options, entry.shape) {
      (Some(options), _) => RawPluginEntry::Wrapped(vec![Value::String(entry.id), Value::Object(options)]),
      (None, EntryShape::Bare) => RawPluginEntry::Bare(entry.id),
      (None, _) => RawPluginEntry::Wrapped(vec![Value::String(entry.id)]),
    }
  }
}

impl PluginEntry {
  /// A bare entry with no options
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      options: None,
      shape: EntryShape::Bare,
    }
  }

  /// An `[id, options]` pair
  pub fn with_options(id: impl Into<String>, options: PluginOptions) -> Self {
    Self {
      id: id.into(),
      options: Some(options),
      shape: EntryShape::Pair,
    }
  }

  /// Builder helper used by the templates: `["id"]`
  pub fn single(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      options: None,
      shape: EntryShape::Single,
    }
  }

  pub fn known(&self) -> Option<KnownPlugin> {
    KnownPlugin::from_id(&self.id)
  }

  pub fn is(&self, plugin: KnownPlugin) -> bool {
    self.id == plugin.id()
  }

  /// Whether this entry takes part in the commit-analysis step
  ///
  /// The exec plugin only does when it is given an `analyzeCommitsCmd`.
  pub fn analyzes_commits(&self) -> bool {
    match self.known() {
      Some(KnownPlugin::CommitAnalyzer) => true,
      Some(KnownPlugin::Exec) => self.option("analyzeCommitsCmd").is_some(),
      _ => false,
    }
  }

  pub fn option(&self, key: &str) -> Option<&Value> {
    self.options.as_ref()?.get(key)
  }

  /// Deserialize one option key into a typed value
  fn option_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
    self.option(key).cloned().map(serde_json::from_value).transpose()
  }

  /// Deserialize the whole options mapping into a typed value
  fn options_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
    self
      .options
      .as_ref()
      .map(|options| serde_json::from_value(Value::Object(options.clone())))
      .transpose()
  }

  /// `presetConfig` of the commit analyzer or release-notes generator
  pub fn preset_config(&self) -> Result<Option<PresetConfig>, serde_json::Error> {
    self.option_as("presetConfig")
  }

  /// Each `presetConfig.types` entry parsed on its own, so one bad entry
  /// does not hide the others
  pub fn commit_type_entries(&self) -> Option<Vec<Result<CommitTypeMapping, String>>> {
    let types = self.option("presetConfig")?.get("types")?.as_array()?;
    Some(
      types
        .iter()
        .map(|value| serde_json::from_value(value.clone()).map_err(|e| e.to_string()))
        .collect(),
    )
  }

  pub fn release_rules(&self) -> Result<Option<Vec<ReleaseRule>>, serde_json::Error> {
    self.option_as("releaseRules")
  }

  /// Changelog options; the default file applies when none are given
  pub fn changelog_options(&self) -> Result<Option<ChangelogOptions>, serde_json::Error> {
    if !self.is(KnownPlugin::Changelog) {
      return Ok(None);
    }
    Ok(Some(self.options_as()?.unwrap_or_default()))
  }

  /// Git step options; the default assets apply when none are given
  pub fn git_options(&self) -> Result<Option<GitOptions>, serde_json::Error> {
    if !self.is(KnownPlugin::Git) {
      return Ok(None);
    }
    Ok(Some(self.options_as()?.unwrap_or_default()))
  }

  pub fn maven_options(&self) -> Result<Option<MavenOptions>, serde_json::Error> {
    if !self.is(KnownPlugin::Maven) {
      return Ok(None);
    }
    self.options_as()
  }
}

impl fmt::Display for PluginEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.id)
  }
}

/// Plugins relconf has typed knowledge of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownPlugin {
  CommitAnalyzer,
  ReleaseNotesGenerator,
  Changelog,
  Git,
  Github,
  Npm,
  Exec,
  Maven,
}

impl KnownPlugin {
  pub const ALL: [KnownPlugin; 8] = [
    KnownPlugin::CommitAnalyzer,
    KnownPlugin::ReleaseNotesGenerator,
    KnownPlugin::Changelog,
    KnownPlugin::Git,
    KnownPlugin::Github,
    KnownPlugin::Npm,
    KnownPlugin::Exec,
    KnownPlugin::Maven,
  ];

  pub fn id(self) -> &'static str {
    match self {
      KnownPlugin::CommitAnalyzer => "@semantic-release/commit-analyzer",
      KnownPlugin::ReleaseNotesGenerator => "@semantic-release/release-notes-generator",
      KnownPlugin::Changelog => "@semantic-release/changelog",
      KnownPlugin::Git => "@semantic-release/git",
      KnownPlugin::Github => "@semantic-release/github",
      KnownPlugin::Npm => "@semantic-release/npm",
      KnownPlugin::Exec => "@semantic-release/exec",
      KnownPlugin::Maven => "semantic-release-maven",
    }
  }

  pub fn from_id(id: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|plugin| plugin.id() == id)
  }

  /// What the plugin does in the pipeline, for display
  pub fn role(self) -> &'static str {
    match self {
      KnownPlugin::CommitAnalyzer => "commit analysis",
      KnownPlugin::ReleaseNotesGenerator => "release notes",
      KnownPlugin::Changelog => "changelog file",
      KnownPlugin::Git => "release commit",
      KnownPlugin::Github => "GitHub release",
      KnownPlugin::Npm => "npm publish",
      KnownPlugin::Exec => "shell commands",
      KnownPlugin::Maven => "Maven publish",
    }
  }
}

/// Conventional-changelog preset configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
  #[serde(default)]
  pub types: Vec<CommitTypeMapping>,
}

/// Maps a commit type onto a changelog section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeMapping {
  #[serde(rename = "type")]
  pub commit_type: String,
  pub section: String,
  #[serde(default)]
  pub hidden: bool,
}

impl CommitTypeMapping {
  pub fn new(commit_type: &str, section: &str, hidden: bool) -> Self {
    Self {
      commit_type: commit_type.to_string(),
      section: section.to_string(),
      hidden,
    }
  }
}

/// Custom release rule for the commit analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRule {
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub commit_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scope: Option<String>,
  pub release: ReleaseKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRelease", into = "RawRelease")]
pub enum ReleaseKind {
  Major,
  Minor,
  Patch,
  Prerelease,
  /// `release: false`
  NoRelease,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawRelease {
  Flag(bool),
  Name(String),
}

impl TryFrom<RawRelease> for ReleaseKind {
  type Error = String;

  fn try_from(raw: RawRelease) -> Result<Self, Self::Error> {
    match raw {
      RawRelease::Flag(false) => Ok(ReleaseKind::NoRelease),
      RawRelease::Flag(true) => Err("`release` must be a release type or `false`".to_string()),
      RawRelease::Name(name) => match name.as_str() {
        "major" => Ok(ReleaseKind::Major),
        "minor" => Ok(ReleaseKind::Minor),
        "patch" => Ok(ReleaseKind::Patch),
        "prerelease" => Ok(ReleaseKind::Prerelease),
        other => Err(format!(
          "unknown release type '{}', expected major, minor, patch, prerelease or false",
          other
        )),
      },
    }
  }
}

impl From<ReleaseKind> for RawRelease {
  fn from(kind: ReleaseKind) -> Self {
    match kind {
      ReleaseKind::Major => RawRelease::Name("major".to_string()),
      ReleaseKind::Minor => RawRelease::Name("minor".to_string()),
      ReleaseKind::Patch => RawRelease::Name("patch".to_string()),
      ReleaseKind::Prerelease => RawRelease::Name("prerelease".to_string()),
      ReleaseKind::NoRelease => RawRelease::Flag(false),
    }
  }
}

pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

fn default_changelog_file() -> String {
  DEFAULT_CHANGELOG_FILE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogOptions {
  #[serde(default = "default_changelog_file")]
  pub changelog_file: String,
  #[serde(default)]
  pub changelog_title: Option<String>,
}

impl Default for ChangelogOptions {
  fn default() -> Self {
    Self {
      changelog_file: default_changelog_file(),
      changelog_title: None,
    }
  }
}

/// Files the git step commits when no `assets` are configured
pub const DEFAULT_GIT_ASSETS: [&str; 4] = [
  "CHANGELOG.md",
  "package.json",
  "package-lock.json",
  "npm-shrinkwrap.json",
];

/// Options of the git step: files committed with the release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitOptions {
  #[serde(default)]
  pub assets: Option<Vec<String>>,
  #[serde(default)]
  pub message: Option<String>,
}

impl GitOptions {
  /// Configured asset globs, or the step's defaults
  pub fn effective_assets(&self) -> Vec<String> {
    match &self.assets {
      Some(assets) => assets.clone(),
      None => DEFAULT_GIT_ASSETS.iter().map(|a| a.to_string()).collect(),
    }
  }

  /// Whether the release commit picks up `file`
  ///
  /// Globs that do not compile never match; the assets check reports them.
  pub fn commits_file(&self, file: &str) -> bool {
    self
      .effective_assets()
      .iter()
      .filter_map(|asset| glob::Pattern::new(asset).ok())
      .any(|pattern| pattern.matches(file))
  }
}

/// Options of the Maven registry publisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenOptions {
  pub server_id: String,
  #[serde(default)]
  pub settings_path: Option<String>,
  #[serde(default)]
  pub maven_target: Option<String>,
}
