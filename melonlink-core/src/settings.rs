//! Clap-free settings for the prebuild pipeline.

use crate::config::{self, DEFAULT_NODE_MODULES, MelonlinkConfig};
use camino::{Utf8Path, Utf8PathBuf};
use melonlink_types::{ModRequest, Platform};

#[derive(Debug, Clone)]
pub struct PrebuildSettings {
    pub project_root: Utf8PathBuf,
    pub ios_dir: String,
    pub android_dir: String,

    /// Prefix for paths inside injected snippets.
    pub node_modules: String,

    pub dry_run: bool,
}

impl Default for PrebuildSettings {
    fn default() -> Self {
        Self {
            project_root: Utf8PathBuf::from("."),
            ios_dir: "ios".to_string(),
            android_dir: "android".to_string(),
            node_modules: DEFAULT_NODE_MODULES.to_string(),
            dry_run: false,
        }
    }
}

impl PrebuildSettings {
    pub fn from_config(project_root: impl Into<Utf8PathBuf>, config: &MelonlinkConfig) -> Self {
        Self {
            project_root: project_root.into(),
            node_modules: config.paths.node_modules.clone(),
            dry_run: config.apply.dry_run,
            ..Self::default()
        }
    }

    /// Settings from `melonlink.toml` at `project_root`, or defaults.
    pub fn load(project_root: &Utf8Path) -> anyhow::Result<Self> {
        let cfg = config::load_or_default(project_root)?;
        Ok(Self::from_config(project_root.to_path_buf(), &cfg))
    }

    pub fn mod_request(&self, platform: Platform) -> ModRequest {
        let dir = match platform {
            Platform::Ios => &self.ios_dir,
            Platform::Android => &self.android_dir,
        };
        ModRequest::new(platform, &self.project_root, dir)
    }
}
