//! Platform steps.
//!
//! Each step reads every file it edits, stages the new contents in a
//! [`PatchSet`], and only then writes. A step that fails while staging
//! leaves the project untouched.

pub mod android;
pub mod ios;

use crate::error::PrebuildError;
use crate::ports::ProjectFs;
use crate::settings::PrebuildSettings;
use camino::Utf8Path;
use melonlink_edit::{Anchor, MergeRequest, PatchSet, merge_contents};
use melonlink_types::{ModRequest, Platform, ProjectConfig, QueuedMod};
use tracing::{debug, info};

/// Stage the step registered under `m`, without writing.
pub async fn stage_step<F: ProjectFs>(
    m: &QueuedMod,
    req: &ModRequest,
    config: &ProjectConfig,
    settings: &PrebuildSettings,
    fs: &F,
) -> Result<PatchSet, PrebuildError> {
    match (m.platform, m.name.as_str()) {
        (Platform::Ios, ios::STEP_NAME) => ios::stage(req, settings, fs).await,
        (Platform::Android, android::STEP_NAME) => {
            android::stage(req, config, settings, fs).await
        }
        _ => Err(PrebuildError::UnknownMod {
            platform: m.platform,
            name: m.name.clone(),
        }),
    }
}

/// Write every changed file in `patches`. Returns the number written.
pub async fn commit<F: ProjectFs>(patches: &PatchSet, fs: &F) -> Result<usize, PrebuildError> {
    let mut written = 0;
    for (path, patch) in patches.changed() {
        fs.write(path, &patch.after).await?;
        info!(path = %path, "updated");
        written += 1;
    }
    Ok(written)
}

/// Compile an anchor pattern for `path`, the resolved file it will edit.
pub(crate) fn anchor_pattern(path: &Utf8Path, pattern: &str) -> Result<Anchor, PrebuildError> {
    Anchor::pattern(pattern).map_err(|e| PrebuildError::edit(path, e))
}

/// Read `path` and stage the result of `merges` applied in order.
pub(crate) async fn stage_merges<F: ProjectFs>(
    patches: &mut PatchSet,
    fs: &F,
    path: &Utf8Path,
    merges: &[MergeRequest],
) -> Result<(), PrebuildError> {
    let before = fs.read_to_string(path).await?;
    let mut after = before.clone();

    for req in merges {
        let out = merge_contents(&after, req).map_err(|e| PrebuildError::edit(path, e))?;
        if !out.did_merge {
            debug!(path = %path, tag = %req.tag, "already merged");
        }
        after = out.contents;
    }

    patches.stage(path, before, after);
    Ok(())
}
