//! Edit engine for melonlink.
//!
//! Responsibilities:
//! - Anchor-merge: insert a tag-fenced block after the line holding an anchor,
//!   exactly once per tag.
//! - Line-splice: insert a fragment at a fixed offset from a located line, with
//!   an optional tag-fenced form.
//! - Stage before/after contents and render a unified diff preview.
//!
//! Everything here is pure text in, text out. Reading and writing files is the
//! caller's job.

pub mod anchor;
pub mod error;
pub mod markers;
pub mod merge;
pub mod patch;
pub mod splice;
pub mod text;

pub use anchor::Anchor;
pub use error::{EditError, EditResult};
pub use merge::{MergeOutcome, MergeRequest, merge_contents, remove_generated_contents};
pub use patch::{FilePatch, PatchSet};
pub use splice::{
    LinePredicate, SpliceOutcome, SpliceRequest, find_line, splice_block, splice_lines,
};
pub use text::{LineEnding, join_lines, split_lines};
