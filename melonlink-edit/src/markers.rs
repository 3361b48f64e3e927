//! Tag markers that fence generated blocks.
//!
//! ```text
//! # @generated begin <tag> - melonlink (DO NOT MODIFY) sync-<sha256(fragment)>
//! ...fragment...
//! # @generated end <tag>
//! ```
//!
//! The sync hash lets a rerun tell an up-to-date block from a stale one.

use sha2::{Digest, Sha256};

pub const GENERATOR: &str = "melonlink";

pub fn sync_hash(fragment: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fragment.as_bytes());
    format!("sync-{}", hex::encode(hasher.finalize()))
}

pub fn begin_marker(comment: &str, tag: &str, fragment: &str) -> String {
    format!(
        "{}{GENERATOR} (DO NOT MODIFY) {}",
        begin_prefix(comment, tag),
        sync_hash(fragment)
    )
}

pub fn end_marker(comment: &str, tag: &str) -> String {
    format!("{comment} @generated end {tag}")
}

/// Begin marker up to and including the separator after the tag, so `a`
/// never matches the block of `ab`.
pub(crate) fn begin_prefix(comment: &str, tag: &str) -> String {
    format!("{comment} @generated begin {tag} - ")
}

/// Line text without the indent pad and line terminator. Trailing spaces
/// are kept so a tag or comment ending in a space still matches exactly.
pub(crate) fn marker_text(line: &str) -> &str {
    line.trim_start_matches(' ').trim_end_matches(['\r', '\n'])
}

pub(crate) fn is_begin_line(line: &str, comment: &str, tag: &str) -> bool {
    marker_text(line).starts_with(marker_text(&begin_prefix(comment, tag)))
}

pub(crate) fn is_end_line(line: &str, comment: &str, tag: &str) -> bool {
    marker_text(line) == marker_text(&end_marker(comment, tag))
}
