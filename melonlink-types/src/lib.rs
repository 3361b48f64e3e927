//! Shared DTOs for the melonlink workspace.
//!
//! # Design constraints
//! - `ProjectConfig` is owned by the host pipeline; fields melonlink does not
//!   understand must survive a deserialize/serialize round trip untouched.
//! - Queued mods are a side channel and never serialized.

pub mod config;
pub mod mods;

pub use config::{AndroidConfig, IosConfig, ProjectConfig};
pub use mods::{ModRequest, Platform, QueuedMod};
