//! Plugin entry points.
//!
//! A plugin takes the app configuration by value and returns it with its
//! steps appended to the mod queue. Nothing here touches the filesystem; the
//! queued steps run later in [`run_mods`](crate::pipeline::run_mods).

use crate::steps::{android, ios};
use melonlink_types::{Platform, ProjectConfig, QueuedMod};
use tracing::debug;

pub type Plugin = fn(ProjectConfig) -> ProjectConfig;

/// Apply `plugins` in order.
pub fn with_plugins(config: ProjectConfig, plugins: &[Plugin]) -> ProjectConfig {
    plugins.iter().fold(config, |config, plugin| plugin(config))
}

pub fn with_ios_watermelon(mut config: ProjectConfig) -> ProjectConfig {
    debug!(step = ios::STEP_NAME, "queueing iOS step");
    config.queue_mod(QueuedMod::new(Platform::Ios, ios::STEP_NAME));
    config
}

pub fn with_android_watermelon(mut config: ProjectConfig) -> ProjectConfig {
    debug!(step = android::STEP_NAME, "queueing Android step");
    config.queue_mod(QueuedMod::new(Platform::Android, android::STEP_NAME));
    config
}

/// Both platform steps, iOS first.
pub fn with_watermelon(config: ProjectConfig) -> ProjectConfig {
    with_plugins(config, &[with_ios_watermelon, with_android_watermelon])
}
