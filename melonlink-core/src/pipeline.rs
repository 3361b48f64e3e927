//! Mod runner.
//!
//! Executes the steps queued on a [`ProjectConfig`] in registration order.
//! All file access goes through the [`ProjectFs`] port.

use crate::error::PrebuildError;
use crate::ports::ProjectFs;
use crate::settings::PrebuildSettings;
use crate::steps;
use melonlink_edit::PatchSet;
use melonlink_types::ProjectConfig;
use tracing::{debug, info};

/// Outcome of `run_mods`.
#[derive(Debug)]
pub struct ModsOutcome {
    pub config: ProjectConfig,
    /// Every file the steps read, with staged contents.
    pub patches: PatchSet,
    /// Unified diff of all changes, paths relative to the project root.
    pub patch: String,
    pub files_written: usize,
}

/// Run every queued mod.
///
/// Each step is staged and committed before the next one starts, so an error
/// in a later step leaves earlier steps' writes in place. With
/// `settings.dry_run` nothing is written.
pub async fn run_mods<F: ProjectFs>(
    config: ProjectConfig,
    settings: &PrebuildSettings,
    fs: &F,
) -> Result<ModsOutcome, PrebuildError> {
    let mut patches = PatchSet::new();
    let mut files_written = 0;

    for m in &config.mods {
        let req = settings.mod_request(m.platform);
        debug!(platform = %m.platform, step = %m.name, root = %req.platform_project_root, "running mod");

        let staged = steps::stage_step(m, &req, &config, settings, fs).await?;
        if settings.dry_run {
            debug!(step = %m.name, changed = staged.changed_count(), "dry run; not writing");
        } else {
            files_written += steps::commit(&staged, fs).await?;
        }
        patches.extend(staged);
    }

    let patch = patches.render_patch(&settings.project_root);
    info!(
        mods = config.mods.len(),
        changed = patches.changed_count(),
        written = files_written,
        "prebuild mods complete"
    );

    Ok(ModsOutcome {
        config,
        patches,
        patch,
        files_written,
    })
}
