//! Error type for prebuild steps.

use camino::Utf8PathBuf;
use melonlink_edit::EditError;
use melonlink_types::Platform;

/// Exit code 2 = native project drifted from the template, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum PrebuildError {
    /// An edit could not be placed in `path`.
    #[error("{path}: {source}")]
    Edit {
        path: Utf8PathBuf,
        #[source]
        source: EditError,
    },

    /// A mod on the queue has no step registered under its name.
    #[error("no {platform} step named `{name}`")]
    UnknownMod { platform: Platform, name: String },

    /// Reading or writing a project file failed.
    #[error("{0:#}")]
    FileIo(#[from] anyhow::Error),
}

impl PrebuildError {
    pub fn edit(path: impl Into<Utf8PathBuf>, source: EditError) -> Self {
        PrebuildError::Edit {
            path: path.into(),
            source,
        }
    }

    /// True when the file no longer matches the template the step expects.
    pub fn is_template_drift(&self) -> bool {
        matches!(self, PrebuildError::Edit { source, .. } if source.is_template_drift())
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_template_drift() { 2 } else { 1 }
    }
}
