//! Android step: register the WatermelonDB JSI subproject and install its
//! module package.
//!
//! Touches four files under the Android project root:
//! - `settings.gradle`: include `:watermelondb-jsi` and point it at the
//!   package sources in `node_modules`.
//! - `app/build.gradle`: depend on the subproject.
//! - `app/proguard-rules.pro`: keep the WatermelonDB classes.
//! - `MainApplication.java`: import the JSI types and override
//!   `getJSIModulePackage()`.

use super::{anchor_pattern, stage_merges};
use crate::error::PrebuildError;
use crate::ports::ProjectFs;
use crate::settings::PrebuildSettings;
use camino::{Utf8Path, Utf8PathBuf};
use melonlink_edit::{
    Anchor, LinePredicate, MergeRequest, PatchSet, SpliceRequest, join_lines, splice_block,
    split_lines,
};
use melonlink_types::{ModRequest, ProjectConfig};
use tracing::{debug, info, warn};

pub const STEP_NAME: &str = "watermelondb-jsi";

/// Tag shared by the Gradle and ProGuard blocks.
pub const TAG: &str = "@nozbe/watermelondb/jsi-installation";
pub const IMPORTS_TAG: &str = "@nozbe/watermelondb/jsi-imports";
pub const MODULE_PACKAGE_TAG: &str = "@nozbe/watermelondb/jsi-module-package";

const SETTINGS_ANCHOR: &str = "include ':app'";
const BUILD_GRADLE_ANCHOR: &str =
    r#"def isGifEnabled = \(findProperty\('expo\.gif\.enabled'\) \?: ""\) == "true";"#;
const PROGUARD_ANCHOR: &str = r"# Add any project specific keep options here:";

const IMPORTS_AFTER: &str = "import java.util.List;";
const HERMES_MARKER: &str = "isHermesEnabled()";
/// Skips the `isHermesEnabled()` signature, its body line and closing brace.
const HERMES_BLOCK_LINES: usize = 3;

const JSI_IMPORTS: &str = "\
import java.util.Arrays;
import com.facebook.react.bridge.JSIModuleSpec;
import com.facebook.react.bridge.JSIModulePackage;
import com.facebook.react.bridge.ReactApplicationContext;
import com.facebook.react.bridge.JavaScriptContextHolder;
import com.nozbe.watermelondb.jsi.WatermelonDBJSIPackage;";

const JSI_MODULE_PACKAGE: &str = "
      @Override
      protected JSIModulePackage getJSIModulePackage() {
        return new JSIModulePackage() {
          @Override
          public List<JSIModuleSpec> getJSIModules(
            final ReactApplicationContext reactApplicationContext,
            final JavaScriptContextHolder jsContext
          ) {
            List<JSIModuleSpec> modules = Arrays.asList();

            modules.addAll(new WatermelonDBJSIPackage().getJSIModules(reactApplicationContext, jsContext));
            // add more JSI packages here

            return modules;
          }
        };
      }";

pub fn settings_gradle_fragment(node_modules: &str) -> String {
    format!(
        "include ':watermelondb-jsi'\n\
         project(':watermelondb-jsi').projectDir =\n    \
         new File(rootProject.projectDir, '{node_modules}/@nozbe/watermelondb/native/android-jsi')"
    )
}

/// `app/src/main/java/<package with dots as slashes>/MainApplication.java`.
///
/// A missing package yields `app/src/main/java/MainApplication.java`, which
/// fails when read.
pub fn main_application_path(package: Option<&str>) -> Utf8PathBuf {
    let mut path = Utf8PathBuf::from("app/src/main/java");
    if let Some(package) = package {
        path.push(package.replace('.', "/"));
    }
    path.push("MainApplication.java");
    path
}

pub async fn stage<F: ProjectFs>(
    req: &ModRequest,
    config: &ProjectConfig,
    settings: &PrebuildSettings,
    fs: &F,
) -> Result<PatchSet, PrebuildError> {
    let root = &req.platform_project_root;
    let settings_gradle = root.join("settings.gradle");
    let build_gradle = root.join("app/build.gradle");
    let proguard = root.join("app/proguard-rules.pro");
    let mut patches = PatchSet::new();

    stage_merges(
        &mut patches,
        fs,
        &settings_gradle,
        &[MergeRequest::new(
            TAG,
            settings_gradle_fragment(&settings.node_modules),
            Anchor::literal(SETTINGS_ANCHOR),
        )
        .comment("//")],
    )
    .await?;

    stage_merges(
        &mut patches,
        fs,
        &build_gradle,
        &[MergeRequest::new(
            TAG,
            "implementation project(':watermelondb-jsi')",
            anchor_pattern(&build_gradle, BUILD_GRADLE_ANCHOR)?,
        )
        .comment("//")
        .indent(4)],
    )
    .await?;

    stage_merges(
        &mut patches,
        fs,
        &proguard,
        &[MergeRequest::new(
            TAG,
            "-keep class com.nozbe.watermelondb.** { *; }",
            anchor_pattern(&proguard, PROGUARD_ANCHOR)?,
        )
        .comment("#")],
    )
    .await?;

    let package = config.android_package();
    if package.is_none() {
        warn!("android.package is not set; MainApplication.java path has no package directory");
    }
    let entry = root.join(main_application_path(package));
    stage_main_application(&mut patches, fs, &entry).await?;

    info!(
        platform = %req.platform,
        changed = patches.changed_count(),
        "staged Android step"
    );
    Ok(patches)
}

async fn stage_main_application<F: ProjectFs>(
    patches: &mut PatchSet,
    fs: &F,
    path: &Utf8Path,
) -> Result<(), PrebuildError> {
    let before = fs.read_to_string(path).await?;
    let (lines, eol) = split_lines(&before);

    let imports = SpliceRequest::new(
        IMPORTS_TAG,
        JSI_IMPORTS,
        LinePredicate::Exact(IMPORTS_AFTER.to_string()),
        1,
    )
    .line_ending(eol);
    let module_package = SpliceRequest::new(
        MODULE_PACKAGE_TAG,
        JSI_MODULE_PACKAGE,
        LinePredicate::Contains(HERMES_MARKER.to_string()),
        HERMES_BLOCK_LINES,
    )
    .line_ending(eol);

    let with_imports =
        splice_block(&lines, &imports).map_err(|e| PrebuildError::edit(path, e))?;
    let with_package = splice_block(&with_imports.lines, &module_package)
        .map_err(|e| PrebuildError::edit(path, e))?;

    if !with_imports.did_splice && !with_package.did_splice {
        debug!(path = %path, "JSI module package already installed");
    }

    patches.stage(path, before, join_lines(&with_package.lines, eol));
    Ok(())
}
