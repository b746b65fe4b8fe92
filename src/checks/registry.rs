//! Package registry check
//!
//! The Maven publisher needs a `serverId` naming the registry endpoint it
//! deploys to. When that id is written as a URL it has to be one.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::RelconfResult;
use crate::core::plugin::KnownPlugin;
use url::Url;

pub struct RegistryCheck;

impl Check for RegistryCheck {
  fn name(&self) -> &'static str {
    "registry"
  }

  fn description(&self) -> &'static str {
    "Validate the Maven publisher names a registry endpoint"
  }

  fn run(&self, ctx: &CheckContext) -> RelconfResult<CheckResult> {
    let plugins = ctx.config.effective_plugins();
    let mut server_ids = Vec::new();
    let mut errors = Vec::new();
    let mut insecure = Vec::new();

    for (idx, plugin) in plugins.iter().enumerate().filter(|(_, p)| p.is(KnownPlugin::Maven)) {
      let location = format!("plugins[{}] ({})", idx, plugin.id);
      match plugin.maven_options() {
        Ok(Some(options)) => {
          let server_id = options.server_id.trim().to_string();
          if server_id.is_empty() {
            errors.push(format!("{}: `serverId` is empty", location));
          } else if server_id.contains("://")
            && let Err(reason) = check_registry_url(&server_id)
          {
            errors.push(format!("{}: `serverId` '{}' is not a valid URL: {}", location, server_id, reason));
          } else {
            if server_id.starts_with("http://") {
              insecure.push(server_id.clone());
            }
            server_ids.push(server_id);
          }
        }
        Ok(None) => errors.push(format!("{}: no options, `serverId` is required", location)),
        Err(e) => errors.push(format!("{}: {}", location, e)),
      }
    }

    if !errors.is_empty() {
      return Ok(CheckResult::error(
        self.name(),
        errors.join("; "),
        Some(format!(
          "Give {} a `serverId`, e.g. [\"{}\", {{ \"serverId\": \"https://maven.pkg.github.com/OWNER/REPO\" }}]",
          KnownPlugin::Maven.id(),
          KnownPlugin::Maven.id()
        )),
      ));
    }

    if server_ids.is_empty() {
      return Ok(CheckResult::pass(self.name(), "No registry publisher configured"));
    }

    if !insecure.is_empty() {
      return Ok(
        CheckResult::warning(
          self.name(),
          format!("Registry endpoint(s) over plain HTTP: {}", insecure.join(", ")),
          Some("Publish over https:// so credentials are not sent in clear text"),
        )
        .with_details(serde_json::json!({ "server_ids": server_ids })),
      );
    }

    Ok(
      CheckResult::pass(self.name(), format!("Publishing to {}", server_ids.join(", ")))
        .with_details(serde_json::json!({ "server_ids": server_ids })),
    )
  }
}

/// A registry URL must use http(s) and name a host
fn check_registry_url(server_id: &str) -> Result<(), String> {
  let url = Url::parse(server_id).map_err(|e| e.to_string())?;
  if !matches!(url.scheme(), "http" | "https") {
    return Err(format!("unsupported scheme '{}'", url.scheme()));
  }
  if url.host().is_none() {
    return Err("no host".to_string());
  }
  Ok(())
}
