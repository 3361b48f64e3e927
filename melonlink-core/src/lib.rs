//! Embeddable core library for melonlink.
//!
//! Links WatermelonDB into the native projects an Expo prebuild generates.
//! Clap-free and I/O-abstracted so a host pipeline can drive it directly.
//!
//! # Port traits
//!
//! All file access goes through [`ProjectFs`](ports::ProjectFs). The
//! [`adapters`] module provides a filesystem-backed implementation and an
//! in-memory one for embedding and tests.
//!
//! # Entry points
//!
//! - [`with_ios_watermelon`], [`with_android_watermelon`], [`with_watermelon`]:
//!   register the platform steps on a [`ProjectConfig`]'s mod queue.
//! - [`run_mods`](pipeline::run_mods): execute the queued steps against a
//!   project on disk (or in memory).

pub mod adapters;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod plugin;
pub mod ports;
pub mod settings;
pub mod steps;

pub use error::PrebuildError;
pub use pipeline::{ModsOutcome, run_mods};
pub use plugin::{
    Plugin, with_android_watermelon, with_ios_watermelon, with_plugins, with_watermelon,
};
pub use settings::PrebuildSettings;

// Re-export the shared types so embedders don't need melonlink-types directly.
pub use melonlink_types::{ModRequest, Platform, ProjectConfig, QueuedMod};
