//! Show the resolved configuration
//!
//! Branches with their kind, channel and prerelease identifier, the plugin
//! pipeline in execution order, and which commit types reach the changelog.

use crate::core::branch::ResolvedBranch;
use crate::core::config::LoadedConfig;
use crate::core::context::ConfigContext;
use crate::core::error::{RelconfError, RelconfResult};
use serde::Serialize;

/// Resolved view of a configuration, as printed by `relconf show`
#[derive(Debug, Serialize)]
pub struct ConfigView {
  pub source: String,
  pub format: String,
  pub tag_format: String,
  pub extends: Vec<String>,
  /// `true` when the branch list is the engine's default set
  pub default_branches: bool,
  pub branches: Vec<ResolvedBranch>,
  /// `true` when the plugin list is the engine's default pipeline
  pub default_plugins: bool,
  pub plugins: Vec<PluginView>,
  pub sections: Vec<SectionView>,
}

#[derive(Debug, Serialize)]
pub struct PluginView {
  pub position: usize,
  pub id: String,
  pub role: Option<&'static str>,
  pub option_keys: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SectionView {
  pub section: String,
  pub commit_types: Vec<String>,
  pub hidden: bool,
}

impl ConfigView {
  pub fn build(loaded: &LoadedConfig) -> Self {
    let config = &loaded.config;
    let plugins = config.effective_plugins();

    let plugin_views = plugins
      .iter()
      .enumerate()
      .map(|(idx, plugin)| PluginView {
        position: idx + 1,
        id: plugin.id.clone(),
        role: plugin.known().map(|known| known.role()),
        option_keys: plugin
          .options
          .as_ref()
          .map(|options| options.keys().cloned().collect())
          .unwrap_or_default(),
      })
      .collect();

    // The first plugin with a readable preset decides the sections
    let mut sections: Vec<SectionView> = Vec::new();
    if let Some(preset) = plugins.iter().find_map(|p| p.preset_config().ok().flatten()) {
      for mapping in preset.types {
        match sections
          .iter_mut()
          .find(|s| s.section == mapping.section && s.hidden == mapping.hidden)
        {
          Some(section) => section.commit_types.push(mapping.commit_type),
          None => sections.push(SectionView {
            section: mapping.section,
            commit_types: vec![mapping.commit_type],
            hidden: mapping.hidden,
          }),
        }
      }
    }

    Self {
      source: loaded.path.display().to_string(),
      format: loaded.format.to_string(),
      tag_format: config.tag_format_or_default().to_string(),
      extends: config
        .extends
        .as_ref()
        .map(|e| e.names().into_iter().map(str::to_string).collect())
        .unwrap_or_default(),
      default_branches: config.branches.is_none(),
      branches: config.resolved_branches(),
      default_plugins: config.plugins.is_none(),
      plugins: plugin_views,
      sections,
    }
  }
}

/// Run the show command
pub fn run_show(ctx: &ConfigContext, json: bool) -> RelconfResult<()> {
  let loaded = ctx.load()?;
  let view = ConfigView::build(&loaded);

  if json {
    let json_output = serde_json::to_string_pretty(&view)
      .map_err(|e| RelconfError::message(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json_output);
    return Ok(());
  }

  println!("📄 {} ({})", view.source, view.format);
  println!("🏷️  Tag format: {}", view.tag_format);
  if !view.extends.is_empty() {
    println!("🧩 Extends: {}", view.extends.join(", "));
  }

  println!("\n🌿 Branches:");
  if view.default_branches {
    println!("   (none declared, the engine's default branch set applies)");
  }
  let width = view.branches.iter().map(|b| b.name.len()).max().unwrap_or(0);
  for (idx, branch) in view.branches.iter().enumerate() {
    let mut line = format!(
      "  {}. {:<width$}  {:<11}  channel: {}",
      idx + 1,
      branch.name,
      branch.kind.to_string(),
      branch.channel.as_deref().unwrap_or("(default)"),
      width = width
    );
    if let Some(id) = &branch.prerelease_id {
      line.push_str(&format!("  prerelease: {}", id));
    }
    if let Some(range) = &branch.range {
      line.push_str(&format!("  range: {}", range));
    }
    println!("{}", line);
  }

  println!("\n🔌 Plugins (execution order):");
  if view.default_plugins {
    println!("   (none declared, showing the engine's default pipeline)");
  }
  for plugin in &view.plugins {
    let role = plugin.role.map(|r| format!("  [{}]", r)).unwrap_or_default();
    let options = if plugin.option_keys.is_empty() {
      String::new()
    } else {
      format!("  {{{}}}", plugin.option_keys.join(", "))
    };
    println!("  {}. {}{}{}", plugin.position, plugin.id, role, options);
  }

  if !view.sections.is_empty() {
    println!("\n📝 Changelog sections:");
    for section in view.sections.iter().filter(|s| !s.hidden) {
      println!("   • {} ({})", section.section, section.commit_types.join(", "));
    }
    let hidden: Vec<String> = view
      .sections
      .iter()
      .filter(|s| s.hidden)
      .flat_map(|s| s.commit_types.iter().cloned())
      .collect();
    if !hidden.is_empty() {
      println!("   hidden: {}", hidden.join(", "));
    }
  }

  Ok(())
}
