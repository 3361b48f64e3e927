use crate::mods::QueuedMod;
use serde::{Deserialize, Serialize};

/// App configuration handed through the prebuild pipeline.
///
/// Only the platform metadata melonlink needs is typed; everything else is
/// kept in `extra` so the object passes through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<IosConfig>,

    /// Dangerous mods registered by plugins, in registration order.
    #[serde(skip)]
    pub mods: Vec<QueuedMod>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProjectConfig {
    /// Android application id (`android.package`), if configured.
    pub fn android_package(&self) -> Option<&str> {
        self.android.as_ref().and_then(|a| a.package.as_deref())
    }

    pub fn ios_bundle_identifier(&self) -> Option<&str> {
        self.ios.as_ref().and_then(|i| i.bundle_identifier.as_deref())
    }

    /// Append a mod to the queue. Queuing the same mod twice is a no-op.
    pub fn queue_mod(&mut self, m: QueuedMod) {
        if !self.mods.contains(&m) {
            self.mods.push(m);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IosConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_identifier: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
