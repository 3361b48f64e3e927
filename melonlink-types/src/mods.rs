use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Native platform a mod runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dangerous mod registered on the config, identified by platform + name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueuedMod {
    pub platform: Platform,
    pub name: String,
}

impl QueuedMod {
    pub fn new(platform: Platform, name: impl Into<String>) -> Self {
        Self {
            platform,
            name: name.into(),
        }
    }
}

/// Per-invocation context the pipeline hands to a mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRequest {
    pub platform: Platform,
    pub project_root: Utf8PathBuf,
    /// Native project directory for `platform` (e.g. `<root>/android`).
    pub platform_project_root: Utf8PathBuf,
}

impl ModRequest {
    pub fn new(platform: Platform, project_root: &Utf8Path, platform_dir: &str) -> Self {
        Self {
            platform,
            project_root: project_root.to_path_buf(),
            platform_project_root: project_root.join(platform_dir),
        }
    }
}
