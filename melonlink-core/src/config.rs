//! Configuration loading for melonlink.
//!
//! Two files live at the project root:
//! - `app.json`: the app configuration the plugins register on.
//! - `melonlink.toml` (optional): tool settings.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use melonlink_types::ProjectConfig;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub const APP_CONFIG_FILE_NAME: &str = "app.json";

/// The tool config file name to search for.
pub const CONFIG_FILE_NAME: &str = "melonlink.toml";

pub const DEFAULT_NODE_MODULES: &str = "../node_modules";

/// Top-level configuration from melonlink.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MelonlinkConfig {
    pub paths: PathsConfig,
    pub apply: ApplyConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// `node_modules` as seen from the native project directories. Used
    /// verbatim inside the injected Podfile and Gradle snippets.
    pub node_modules: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            node_modules: DEFAULT_NODE_MODULES.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    /// Compute patches without writing.
    pub dry_run: bool,
}

/// Discover melonlink.toml in the project root.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<MelonlinkConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<MelonlinkConfig> {
    let config: MelonlinkConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<MelonlinkConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(MelonlinkConfig::default()),
    }
}

/// Load `app.json` from the project root.
pub fn load_app_config(project_root: &Utf8Path) -> anyhow::Result<ProjectConfig> {
    let path = project_root.join(APP_CONFIG_FILE_NAME);
    let contents =
        fs::read_to_string(&path).with_context(|| format!("read app config {}", path))?;
    parse_app_config(&contents).with_context(|| format!("parse app config {}", path))
}

/// Parse app config text. Accepts the `{"expo": {...}}` wrapper or a bare
/// object. Keys beside `expo` are kept; a key set inside `expo` wins.
pub fn parse_app_config(contents: &str) -> anyhow::Result<ProjectConfig> {
    let value: Value = serde_json::from_str(contents).context("invalid JSON")?;
    let value = match value {
        Value::Object(mut map) => match map.remove("expo") {
            Some(Value::Object(mut expo)) => {
                for (key, sibling) in map {
                    expo.entry(key).or_insert(sibling);
                }
                Value::Object(expo)
            }
            Some(expo) => expo,
            None => Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(value).context("app config is not an object")
}
