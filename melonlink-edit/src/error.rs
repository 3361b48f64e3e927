//! Error types for melonlink-edit.
//!
//! Two classes of failure:
//! - Template drift: the file no longer contains the anchor or marker line the
//!   edit is keyed on. The native project has to be fixed by hand.
//! - Invalid input: an anchor pattern that does not compile.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// Anchor-merge found no match for its anchor.
    #[error("no insertion point for `{tag}`: anchor {anchor} not found")]
    MissingAnchor {
        /// Tag of the block that could not be placed.
        tag: String,
        /// Rendered anchor (`"literal"` or `/pattern/`).
        anchor: String,
    },

    /// Line-splice found no line satisfying its predicate.
    #[error("marker line not found: {predicate}")]
    MissingMarkerLine {
        /// Rendered predicate.
        predicate: String,
    },

    #[error("invalid anchor pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl EditError {
    /// True when the target file drifted away from the expected template.
    pub fn is_template_drift(&self) -> bool {
        matches!(
            self,
            EditError::MissingAnchor { .. } | EditError::MissingMarkerLine { .. }
        )
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
