use crate::core::branch::{BranchEntry, BranchRule, ResolvedBranch, resolve_branches};
use crate::core::error::{ConfigError, RelconfError, RelconfResult, ResultExt};
use crate::core::plugin::{CommitTypeMapping, KnownPlugin, PluginEntry, PluginOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_TAG_FORMAT: &str = "v${version}";

/// Files searched for a release configuration, in order
///
/// `package.json` only counts when it carries a `release` key.
pub const CONFIG_CANDIDATES: [&str; 9] = [
  ".releaserc",
  ".releaserc.json",
  ".releaserc.yaml",
  ".releaserc.yml",
  ".releaserc.toml",
  "release.config.js",
  "release.config.cjs",
  "release.config.mjs",
  "package.json",
];

/// The release-automation configuration object
///
/// Loaded once at startup and only read afterwards. Branch and plugin order
/// is exactly the declared order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseConfig {
  /// Shareable configurations this one builds on
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub extends: Option<Extends>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub repository_url: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tag_format: Option<String>,

  /// `None` means the engine's default branch set; an explicit empty list is
  /// kept as written
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub branches: Option<Vec<BranchEntry>>,

  /// `None` means the engine's default pipeline
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plugins: Option<Vec<PluginEntry>>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dry_run: Option<bool>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ci: Option<bool>,

  /// Keys relconf has no model for, kept so nothing is lost on save
  #[serde(flatten)]
  pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extends {
  One(String),
  Many(Vec<String>),
}

impl Extends {
  pub fn names(&self) -> Vec<&str> {
    match self {
      Extends::One(name) => vec![name.as_str()],
      Extends::Many(names) => names.iter().map(String::as_str).collect(),
    }
  }
}

/// On-disk format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
  Json,
  Yaml,
  Toml,
  /// The `release` key of a `package.json` manifest
  #[value(name = "package-json")]
  PackageJson,
}

impl ConfigFormat {
  /// Infer the format from a file name
  ///
  /// Returns `None` for an extension-less `.releaserc`, whose content must be
  /// sniffed.
  pub fn from_path(path: &Path) -> RelconfResult<Option<Self>> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

    if file_name == "package.json" {
      return Ok(Some(ConfigFormat::PackageJson));
    }
    if file_name == ".releaserc" {
      return Ok(None);
    }

    match path.extension().and_then(|e| e.to_str()) {
      Some("json") => Ok(Some(ConfigFormat::Json)),
      Some("yaml") | Some("yml") => Ok(Some(ConfigFormat::Yaml)),
      Some("toml") => Ok(Some(ConfigFormat::Toml)),
      _ => Err(RelconfError::Config(ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
      })),
    }
  }

  /// Default file name written for this format
  pub fn default_file_name(self) -> &'static str {
    match self {
      ConfigFormat::Json => ".releaserc.json",
      ConfigFormat::Yaml => ".releaserc.yaml",
      ConfigFormat::Toml => ".releaserc.toml",
      ConfigFormat::PackageJson => "package.json",
    }
  }
}

impl fmt::Display for ConfigFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigFormat::Json => write!(f, "json"),
      ConfigFormat::Yaml => write!(f, "yaml"),
      ConfigFormat::Toml => write!(f, "toml"),
      ConfigFormat::PackageJson => write!(f, "package-json"),
    }
  }
}

/// A parsed configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
  pub config: ReleaseConfig,
  pub path: PathBuf,
  pub format: ConfigFormat,
}

impl ReleaseConfig {
  /// Find the configuration file in `dir`, following [`CONFIG_CANDIDATES`]
  pub fn find_config_path(dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
      .iter()
      .map(|name| dir.join(name))
      .find(|candidate| {
        if !candidate.is_file() {
          return false;
        }
        if candidate.file_name().is_some_and(|n| n == "package.json") {
          return package_json_has_release_key(candidate);
        }
        true
      })
  }

  /// Discover and parse the configuration in `dir`
  pub fn load(dir: &Path) -> RelconfResult<LoadedConfig> {
    let path = Self::find_config_path(dir).ok_or_else(|| {
      RelconfError::Config(ConfigError::NotFound {
        search_root: dir.to_path_buf(),
      })
    })?;
    debug!(path = %path.display(), "discovered release configuration");

    let shadowed: Vec<&str> = CONFIG_CANDIDATES
      .iter()
      .copied()
      .filter(|name| {
        let candidate = dir.join(name);
        candidate != path && candidate.is_file() && (*name != "package.json" || package_json_has_release_key(&candidate))
      })
      .collect();
    if !shadowed.is_empty() {
      warn!(
        using = %path.display(),
        ignored = %shadowed.join(", "),
        "several release configurations found, only the first is used"
      );
    }

    Self::load_file(&path)
  }

  /// Parse an explicit configuration file
  pub fn load_file(path: &Path) -> RelconfResult<LoadedConfig> {
    let hint = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    let (config, format) = match hint {
      Some(format) => (Self::parse(&content, format, path)?, format),
      None => Self::sniff(&content, path)?,
    };

    info!(
      path = %path.display(),
      %format,
      branches = config.declared_branches().len(),
      plugins = config.plugins.as_ref().map(Vec::len),
      "loaded release configuration"
    );

    Ok(LoadedConfig {
      config,
      path: path.to_path_buf(),
      format,
    })
  }

  /// Parse configuration text in a known format
  pub fn from_str(content: &str, format: ConfigFormat) -> RelconfResult<Self> {
    Self::parse(content, format, Path::new(format.default_file_name()))
  }

  fn parse(content: &str, format: ConfigFormat, path: &Path) -> RelconfResult<Self> {
    let parse_error = |reason: String| {
      RelconfError::Config(ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
      })
    };

    match format {
      ConfigFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
      ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
      ConfigFormat::Toml => toml_edit::de::from_str(content).map_err(|e| parse_error(e.to_string())),
      ConfigFormat::PackageJson => {
        let mut manifest: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let release = manifest
          .get_mut("release")
          .map(Value::take)
          .ok_or_else(|| parse_error("no `release` key in package.json".to_string()))?;
        serde_json::from_value(release).map_err(|e| parse_error(e.to_string()))
      }
    }
  }

  /// An extension-less `.releaserc` holds JSON or YAML
  fn sniff(content: &str, path: &Path) -> RelconfResult<(Self, ConfigFormat)> {
    match Self::parse(content, ConfigFormat::Json, path) {
      Ok(config) => Ok((config, ConfigFormat::Json)),
      Err(json_err) => {
        debug!(error = %json_err, "not JSON, retrying as YAML");
        Self::parse(content, ConfigFormat::Yaml, path).map(|config| (config, ConfigFormat::Yaml))
      }
    }
  }

  /// Serialise to the given format
  ///
  /// `PackageJson` yields a `{ "release": ... }` fragment.
  pub fn to_string(&self, format: ConfigFormat) -> RelconfResult<String> {
    let text = match format {
      ConfigFormat::Json => serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")? + "\n",
      ConfigFormat::Yaml => serde_yaml::to_string(self).context("Failed to serialize config to YAML")?,
      ConfigFormat::Toml => toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?,
      ConfigFormat::PackageJson => {
        let fragment = serde_json::json!({ "release": self });
        serde_json::to_string_pretty(&fragment).context("Failed to serialize config to JSON")? + "\n"
      }
    };
    Ok(text)
  }

  /// Write the configuration to `path`
  ///
  /// For `package.json` only the `release` key is replaced; the rest of the
  /// manifest is kept in place.
  pub fn save(&self, path: &Path, format: ConfigFormat) -> RelconfResult<()> {
    let content = match format {
      ConfigFormat::PackageJson if path.exists() => {
        let existing = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let mut manifest: Value =
          serde_json::from_str(&existing).with_context(|| format!("Failed to parse {}", path.display()))?;
        let object = manifest.as_object_mut().ok_or_else(|| {
          RelconfError::with_help(
            format!("{} is not a JSON object", path.display()),
            "Fix the manifest or write the configuration to .releaserc.json instead",
          )
        })?;
        object.insert("release".to_string(), serde_json::to_value(self)?);
        serde_json::to_string_pretty(&manifest)? + "\n"
      }
      _ => self.to_string(format)?,
    };

    fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))?;
    info!(path = %path.display(), %format, "wrote release configuration");
    Ok(())
  }

  pub fn tag_format_or_default(&self) -> &str {
    self.tag_format.as_deref().unwrap_or(DEFAULT_TAG_FORMAT)
  }

  /// Declared plugins, or the engine's default pipeline
  pub fn effective_plugins(&self) -> Vec<PluginEntry> {
    match &self.plugins {
      Some(plugins) => plugins.clone(),
      None => [
        KnownPlugin::CommitAnalyzer,
        KnownPlugin::ReleaseNotesGenerator,
        KnownPlugin::Npm,
        KnownPlugin::Github,
      ]
      .into_iter()
      .map(|plugin| PluginEntry::new(plugin.id()))
      .collect(),
    }
  }

  /// Position of a known plugin in the effective pipeline
  pub fn plugin_position(&self, plugin: KnownPlugin) -> Option<usize> {
    self.effective_plugins().iter().position(|entry| entry.is(plugin))
  }

  /// Declared branches, empty when the key is absent
  pub fn declared_branches(&self) -> &[BranchEntry] {
    self.branches.as_deref().unwrap_or_default()
  }

  pub fn resolved_branches(&self) -> Vec<ResolvedBranch> {
    resolve_branches(self.declared_branches())
  }

  /// The configuration a Maven project publishing to GitHub Packages starts from
  ///
  /// `main` releases on the default channel, `next` cuts prereleases on the
  /// `next` channel. Features, fixes and chores make the changelog, every
  /// other commit type is kept out of it.
  pub fn project_template(server_id: &str) -> Self {
    let types: Vec<Value> = [
      CommitTypeMapping::new("fix", "Fixes", false),
      CommitTypeMapping::new("chore", "Chores", false),
      CommitTypeMapping::new("feat", "Features", false),
      CommitTypeMapping::new("docs", "Documentation", true),
      CommitTypeMapping::new("build", "Build", true),
      CommitTypeMapping::new("ci", "CI", true),
      CommitTypeMapping::new("perf", "Performance Improvements", true),
      CommitTypeMapping::new("refactor", "Refactoring", true),
      CommitTypeMapping::new("test", "Tests", true),
    ]
    .iter()
    .map(|mapping| serde_json::json!(mapping))
    .collect();

    let notes_options = options(serde_json::json!({ "presetConfig": { "types": types } }));
    let git_options = options(serde_json::json!({
      "assets": ["yarn.lock", "pom.xml", "**/pom.xml", "CHANGELOG.md"]
    }));
    let maven_options = options(serde_json::json!({ "serverId": server_id }));

    Self {
      branches: Some(vec![
        BranchRule::named("main").into(),
        BranchRule::prerelease("next").into(),
      ]),
      plugins: Some(vec![
        PluginEntry::single(KnownPlugin::CommitAnalyzer.id()),
        PluginEntry::single(KnownPlugin::Github.id()),
        PluginEntry::single(KnownPlugin::Changelog.id()),
        PluginEntry::with_options(KnownPlugin::ReleaseNotesGenerator.id(), notes_options),
        PluginEntry::with_options(KnownPlugin::Git.id(), git_options),
        PluginEntry::with_options(KnownPlugin::Maven.id(), maven_options),
      ]),
      ..Default::default()
    }
  }
}

fn options(value: Value) -> PluginOptions {
  match value {
    Value::Object(map) => map,
    _ => PluginOptions::new(),
  }
}

fn package_json_has_release_key(path: &Path) -> bool {
  fs::read_to_string(path)
    .ok()
    .and_then(|content| serde_json::from_str::<Value>(&content).ok())
    .is_some_and(|manifest| manifest.get("release").is_some())
}
