//! Branch-release rules
//!
//! A branch entry is either a bare branch name or a rule object:
//!
//! ```json
//! "branches": [
//!   "main",
//!   { "name": "next", "channel": "next", "prerelease": true },
//!   { "name": "1.x", "range": "1.x", "channel": "1.x" }
//! ]
//! ```
//!
//! Declared order is kept as-is. The engine uses it to decide which release
//! branch publishes on the default channel.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Branch names the engine treats as maintenance lines: `1.x`, `1.2.x`, `1.x.x`
static MAINTENANCE_NAME: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\d+(\.(\d+|x))?\.x$").expect("maintenance pattern is valid"));

/// Whether `range` is a maintenance range the engine understands
///
/// Only the `N.x` / `N.N.x` / `N.x.x` shorthand is accepted.
pub fn is_maintenance_range(range: &str) -> bool {
  MAINTENANCE_NAME.is_match(range)
}

/// One entry of the `branches` list, in whichever shape it was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BranchEntry {
  Name(String),
  Rule(BranchRule),
}

impl BranchEntry {
  /// Normalise both shapes to a rule
  pub fn rule(&self) -> BranchRule {
    match self {
      BranchEntry::Name(name) => BranchRule::named(name.clone()),
      BranchEntry::Rule(rule) => rule.clone(),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      BranchEntry::Name(name) => name,
      BranchEntry::Rule(rule) => &rule.name,
    }
  }
}

impl From<BranchRule> for BranchEntry {
  fn from(rule: BranchRule) -> Self {
    BranchEntry::Rule(rule)
  }
}

/// Release rule for a single branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRule {
  pub name: String,

  /// Distribution channel; `false` publishes on the default channel
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub channel: Option<ChannelSetting>,

  /// `true` uses the branch name as prerelease identifier, a string is a template
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prerelease: Option<PrereleaseSetting>,

  /// Version range accepted on a maintenance branch (`1.x`, `1.2.x`)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub range: Option<RangeSetting>,
}

impl BranchRule {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      channel: None,
      prerelease: None,
      range: None,
    }
  }

  /// A prerelease branch publishing on a channel named after itself
  pub fn prerelease(name: impl Into<String>) -> Self {
    let name = name.into();
    Self {
      channel: Some(ChannelSetting::Named(name.clone())),
      prerelease: Some(PrereleaseSetting::Flag(true)),
      name,
      range: None,
    }
  }

  /// Declared range, ignoring `range: false`
  pub fn range_value(&self) -> Option<&str> {
    match self.range.as_ref()? {
      RangeSetting::Range(range) => Some(range),
      RangeSetting::Disabled => None,
    }
  }

  pub fn kind(&self) -> BranchKind {
    if self.range_value().is_some() || MAINTENANCE_NAME.is_match(&self.name) {
      BranchKind::Maintenance
    } else if self.prerelease.as_ref().is_some_and(PrereleaseSetting::is_enabled) {
      BranchKind::Prerelease
    } else {
      BranchKind::Release
    }
  }

  /// Prerelease identifier appended to versions cut from this branch
  ///
  /// `${name}` in a template is replaced by the branch name.
  pub fn prerelease_identifier(&self) -> Option<String> {
    match self.prerelease.as_ref()? {
      PrereleaseSetting::Flag(true) => Some(self.name.clone()),
      PrereleaseSetting::Flag(false) => None,
      PrereleaseSetting::Identifier(template) => Some(template.replace("${name}", &self.name)),
    }
  }

  /// Range a maintenance branch accepts, falling back to the branch name
  pub fn maintenance_range(&self) -> Option<&str> {
    match self.kind() {
      BranchKind::Maintenance => Some(self.range_value().unwrap_or(&self.name)),
      _ => None,
    }
  }
}

/// Explicit channel setting on a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChannel", into = "RawChannel")]
pub enum ChannelSetting {
  /// `channel: false`
  Default,
  Named(String),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawChannel {
  Flag(bool),
  Name(String),
}

impl TryFrom<RawChannel> for ChannelSetting {
  type Error = String;

  fn try_from(raw: RawChannel) -> Result<Self, Self::Error> {
    match raw {
      RawChannel::Flag(false) => Ok(ChannelSetting::Default),
      RawChannel::Flag(true) => Err("`channel` must be a channel name or `false`".to_string()),
      RawChannel::Name(name) => Ok(ChannelSetting::Named(name)),
    }
  }
}

impl From<ChannelSetting> for RawChannel {
  fn from(setting: ChannelSetting) -> Self {
    match setting {
      ChannelSetting::Default => RawChannel::Flag(false),
      ChannelSetting::Named(name) => RawChannel::Name(name),
    }
  }
}

/// Explicit range setting on a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub enum RangeSetting {
  /// `range: false`, the branch is not a maintenance branch by range
  Disabled,
  Range(String),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawRange {
  Flag(bool),
  Range(String),
}

impl TryFrom<RawRange> for RangeSetting {
  type Error = String;

  fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
    match raw {
      RawRange::Flag(false) => Ok(RangeSetting::Disabled),
      RawRange::Flag(true) => Err("`range` must be a version range or `false`".to_string()),
      RawRange::Range(range) => Ok(RangeSetting::Range(range)),
    }
  }
}

impl From<RangeSetting> for RawRange {
  fn from(setting: RangeSetting) -> Self {
    match setting {
      RangeSetting::Disabled => RawRange::Flag(false),
      RangeSetting::Range(range) => RawRange::Range(range),
    }
  }
}

/// Prerelease setting on a branch
///
/// Anything other than `false` makes the branch a prerelease branch, an empty
/// identifier included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrereleaseSetting {
  Flag(bool),
  Identifier(String),
}

impl PrereleaseSetting {
  pub fn is_enabled(&self) -> bool {
    match self {
      PrereleaseSetting::Flag(flag) => *flag,
      PrereleaseSetting::Identifier(_) => true,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
  Release,
  Maintenance,
  Prerelease,
}

impl fmt::Display for BranchKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BranchKind::Release => write!(f, "release"),
      BranchKind::Maintenance => write!(f, "maintenance"),
      BranchKind::Prerelease => write!(f, "prerelease"),
    }
  }
}

/// A branch rule with its channel and identifier worked out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBranch {
  pub name: String,
  pub kind: BranchKind,
  /// `None` is the default channel
  pub channel: Option<String>,
  pub prerelease_id: Option<String>,
  pub range: Option<String>,
}

/// Resolve every declared branch, keeping declared order
///
/// Channel rules: an explicit channel wins, `false` means the default channel,
/// the first release branch publishes on the default channel and every other
/// branch publishes on a channel named after itself.
pub fn resolve_branches(entries: &[BranchEntry]) -> Vec<ResolvedBranch> {
  let mut seen_release = false;

  entries
    .iter()
    .map(|entry| {
      let rule = entry.rule();
      let kind = rule.kind();

      let implicit_default = kind == BranchKind::Release && !seen_release;
      if kind == BranchKind::Release {
        seen_release = true;
      }

      let channel = match &rule.channel {
        Some(ChannelSetting::Named(name)) => Some(name.clone()),
        Some(ChannelSetting::Default) => None,
        None if implicit_default => None,
        None => Some(rule.name.clone()),
      };

      ResolvedBranch {
        kind,
        channel,
        prerelease_id: rule.prerelease_identifier(),
        range: rule.maintenance_range().map(str::to_string),
        name: rule.name,
      }
    })
    .collect()
}
