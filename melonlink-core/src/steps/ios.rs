//! iOS step: add the `simdjson` pod to the Podfile.

use super::{anchor_pattern, stage_merges};
use crate::error::PrebuildError;
use crate::ports::ProjectFs;
use crate::settings::PrebuildSettings;
use camino::Utf8Path;
use melonlink_edit::{MergeRequest, PatchSet};
use melonlink_types::ModRequest;
use tracing::info;

pub const STEP_NAME: &str = "watermelondb-podfile";

pub const TAG: &str = "@nozbe/watermelondb";

const PODFILE_ANCHOR: &str = r"flipper_config = FlipperConfiguration.disabled";

pub fn podfile_fragment(node_modules: &str) -> String {
    format!("pod 'simdjson', path: '{node_modules}/@nozbe/simdjson', modular_headers: true")
}

/// Merge request for the Podfile at `podfile`.
pub fn podfile_merge(node_modules: &str, podfile: &Utf8Path) -> Result<MergeRequest, PrebuildError> {
    let anchor = anchor_pattern(podfile, PODFILE_ANCHOR)?;
    Ok(MergeRequest::new(TAG, podfile_fragment(node_modules), anchor).comment("#"))
}

pub async fn stage<F: ProjectFs>(
    req: &ModRequest,
    settings: &PrebuildSettings,
    fs: &F,
) -> Result<PatchSet, PrebuildError> {
    let podfile = req.platform_project_root.join("Podfile");
    let mut patches = PatchSet::new();

    stage_merges(
        &mut patches,
        fs,
        &podfile,
        &[podfile_merge(&settings.node_modules, &podfile)?],
    )
    .await?;

    info!(
        platform = %req.platform,
        changed = patches.changed_count(),
        "staged iOS step"
    );
    Ok(patches)
}
