//! Anchor-merge: insert a tagged block after the line holding an anchor.
//!
//! The block is fenced by tag markers (see [`crate::markers`]). A block whose
//! begin marker carries the current fragment hash makes the merge a no-op; a
//! block with a different hash is removed and re-inserted at the anchor.

use crate::anchor::Anchor;
use crate::error::{EditError, EditResult};
use crate::markers::{begin_marker, end_marker, is_begin_line, is_end_line, marker_text};
use crate::text::{LineEnding, indent_fragment};
use std::ops::Range;
use tracing::debug;

/// One tagged insertion.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub tag: String,
    pub fragment: String,
    pub anchor: Anchor,
    /// Comment prefix of the target file format (`#`, `//`).
    pub comment: String,
    /// Spaces prepended to every non-blank line of the block.
    pub indent: usize,
}

impl MergeRequest {
    pub fn new(tag: impl Into<String>, fragment: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            tag: tag.into(),
            fragment: fragment.into(),
            anchor,
            comment: "#".to_string(),
            indent: 0,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub contents: String,
    /// A block was inserted.
    pub did_merge: bool,
    /// A stale block for the same tag was removed first.
    pub did_clear: bool,
}

/// Merge `req` into `src`. Returns `src` unchanged when the block is already
/// present and current.
pub fn merge_contents(src: &str, req: &MergeRequest) -> EditResult<MergeOutcome> {
    let header = begin_marker(&req.comment, &req.tag, &req.fragment);
    let existing = find_generated_block(src, &req.comment, &req.tag);

    if let Some(block) = &existing
        && block.header == marker_text(&header)
    {
        debug!(tag = %req.tag, "generated block up to date");
        return Ok(MergeOutcome {
            contents: src.to_string(),
            did_merge: false,
            did_clear: false,
        });
    }

    let base = match &existing {
        Some(block) => {
            debug!(tag = %req.tag, "removing stale generated block");
            remove_block(src, &block.range)
        }
        None => src.to_string(),
    };

    let found = req
        .anchor
        .find(&base)
        .ok_or_else(|| EditError::MissingAnchor {
            tag: req.tag.clone(),
            anchor: req.anchor.to_string(),
        })?;

    let eol = LineEnding::detect(src);
    let insert_at = end_of_line(&base, found);
    let block = render_block(&header, req, eol);

    let mut out = String::with_capacity(base.len() + block.len() + 2);
    out.push_str(&base[..insert_at]);
    if insert_at == base.len() && !base.ends_with('\n') {
        // Anchor sits on an unterminated last line.
        out.push_str(eol.as_str());
        out.push_str(&block);
    } else {
        out.push_str(&block);
        out.push_str(eol.as_str());
        out.push_str(&base[insert_at..]);
    }

    Ok(MergeOutcome {
        contents: out,
        did_merge: true,
        did_clear: existing.is_some(),
    })
}

/// Remove the generated block for `tag`, if any. Returns `None` when absent.
pub fn remove_generated_contents(src: &str, comment: &str, tag: &str) -> Option<String> {
    find_generated_block(src, comment, tag).map(|block| remove_block(src, &block.range))
}

#[derive(Debug)]
struct GeneratedBlock {
    /// From the start of the begin line through the end line's terminator.
    range: Range<usize>,
    /// Begin line without indent pad or terminator.
    header: String,
}

fn find_generated_block(src: &str, comment: &str, tag: &str) -> Option<GeneratedBlock> {
    let mut offset = 0;
    let mut open: Option<(usize, &str)> = None;

    for line in src.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        if is_begin_line(line, comment, tag) {
            open = Some((start, marker_text(line)));
            continue;
        }
        if let Some((block_start, header)) = open
            && is_end_line(line, comment, tag)
        {
            return Some(GeneratedBlock {
                range: block_start..offset,
                header: header.to_string(),
            });
        }
    }

    None
}

fn remove_block(src: &str, range: &Range<usize>) -> String {
    let mut start = range.start;
    if range.end == src.len() && !src.ends_with('\n') {
        // The block was the unterminated tail; drop the terminator before it.
        if src[..start].ends_with("\r\n") {
            start -= 2;
        } else if src[..start].ends_with('\n') {
            start -= 1;
        }
    }
    format!("{}{}", &src[..start], &src[range.end..])
}

/// Byte offset just past the terminator of the line where `found` ends.
fn end_of_line(text: &str, found: Range<usize>) -> usize {
    if text[found.clone()].ends_with('\n') {
        return found.end;
    }
    match text[found.end..].find('\n') {
        Some(i) => found.end + i + 1,
        None => text.len(),
    }
}

fn render_block(header: &str, req: &MergeRequest, eol: LineEnding) -> String {
    let pad = " ".repeat(req.indent);
    let body = indent_fragment(&req.fragment, req.indent, eol);

    let mut parts = vec![format!("{pad}{header}")];
    if !body.is_empty() {
        parts.push(body);
    }
    parts.push(format!("{pad}{}", end_marker(&req.comment, &req.tag)));
    parts.join(eol.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn req(tag: &str, fragment: &str, anchor: &str) -> MergeRequest {
        MergeRequest::new(tag, fragment, Anchor::pattern(anchor).expect("valid pattern"))
    }

    #[test]
    fn inserts_block_after_anchor_line() {
        let out = merge_contents("A\nANCHOR\nB", &req("t", "X", "ANCHOR")).expect("merge");
        let lines: Vec<&str> = out.contents.split('\n').collect();

        assert_eq!(lines[0], "A");
        assert_eq!(lines[1], "ANCHOR");
        assert!(lines[2].starts_with("# @generated begin t - melonlink (DO NOT MODIFY) sync-"));
        assert_eq!(lines[3], "X");
        assert_eq!(lines[4], "# @generated end t");
        assert_eq!(lines[5], "B");
        assert_eq!(lines.len(), 6);
        assert!(out.did_merge);
        assert!(!out.did_clear);
    }

    #[test]
    fn second_merge_is_noop() {
        let request = req("t", "X", "ANCHOR");
        let first = merge_contents("A\nANCHOR\nB\n", &request).expect("first");
        let second = merge_contents(&first.contents, &request).expect("second");

        assert_eq!(second.contents, first.contents);
        assert!(!second.did_merge);
    }

    #[test]
    fn missing_anchor_fails() {
        let err = merge_contents("A\nB\n", &req("t", "X", "ANCHOR")).expect_err("no anchor");
        match err {
            EditError::MissingAnchor { tag, anchor } => {
                assert_eq!(tag, "t");
                assert_eq!(anchor, "/ANCHOR/");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn indent_applies_to_markers_and_body() {
        let request = req("t", "implementation project(':x')", "dependencies \\{").indent(4);
        let out = merge_contents("dependencies {\n}\n", &request).expect("merge");
        let lines: Vec<&str> = out.contents.lines().collect();

        assert!(lines[1].starts_with("    # @generated begin t"));
        assert_eq!(lines[2], "    implementation project(':x')");
        assert_eq!(lines[3], "    # @generated end t");
        assert_eq!(lines[4], "}");
    }

    #[test]
    fn preserves_crlf() {
        let out = merge_contents("A\r\nANCHOR\r\nB\r\n", &req("t", "X\nY", "ANCHOR")).expect("merge");
        assert!(!out.contents.replace("\r\n", "").contains('\n'));
        assert!(out.contents.contains("ANCHOR\r\n# @generated begin t"));
        assert!(out.contents.ends_with("X\r\nY\r\n# @generated end t\r\nB\r\n"));
    }

    #[test]
    fn anchor_on_unterminated_last_line() {
        let request = req("t", "X", "ANCHOR");
        let out = merge_contents("A\nANCHOR", &request).expect("merge");
        assert!(out.contents.starts_with("A\nANCHOR\n# @generated begin t"));
        assert!(out.contents.ends_with("\nX\n# @generated end t"));

        let again = merge_contents(&out.contents, &request).expect("again");
        assert_eq!(again.contents, out.contents);
    }

    #[test]
    fn stale_block_is_replaced() {
        let old = merge_contents("A\nANCHOR\nB\n", &req("t", "OLD", "ANCHOR")).expect("old");
        let new = merge_contents(&old.contents, &req("t", "NEW", "ANCHOR")).expect("new");

        assert!(new.did_merge);
        assert!(new.did_clear);
        assert!(!new.contents.contains("OLD"));
        assert_eq!(new.contents.matches("@generated begin t ").count(), 1);

        let fresh = merge_contents("A\nANCHOR\nB\n", &req("t", "NEW", "ANCHOR")).expect("fresh");
        assert_eq!(new.contents, fresh.contents);
    }

    #[test]
    fn stale_unterminated_tail_block_is_replaced_cleanly() {
        let old = merge_contents("A\nANCHOR", &req("t", "OLD", "ANCHOR")).expect("old");
        let new = merge_contents(&old.contents, &req("t", "NEW", "ANCHOR")).expect("new");
        let fresh = merge_contents("A\nANCHOR", &req("t", "NEW", "ANCHOR")).expect("fresh");
        assert_eq!(new.contents, fresh.contents);
    }

    #[test]
    fn distinct_tags_coexist() {
        let a = merge_contents("A\nANCHOR\nB\n", &req("a", "X", "ANCHOR")).expect("a");
        let b = merge_contents(&a.contents, &req("b", "Y", "B")).expect("b");

        assert!(b.contents.contains("@generated begin a "));
        assert!(b.contents.contains("@generated begin b "));

        let a_again = merge_contents(&b.contents, &req("a", "X", "ANCHOR")).expect("a again");
        assert_eq!(a_again.contents, b.contents);
    }

    #[test]
    fn literal_anchor_matches_mid_line() {
        let request = MergeRequest::new("t", "X", Anchor::literal("':app'")).comment("//");
        let out = merge_contents("rootProject.name = 'x'\ninclude ':app'\n", &request)
            .expect("merge");
        assert!(out.contents.contains("include ':app'\n// @generated begin t"));
    }

    #[test]
    fn remove_generated_contents_roundtrips() {
        let src = "A\nANCHOR\nB\n";
        let merged = merge_contents(src, &req("t", "X", "ANCHOR")).expect("merge");
        let removed = remove_generated_contents(&merged.contents, "#", "t").expect("present");
        assert_eq!(removed, src);
        assert!(remove_generated_contents(src, "#", "t").is_none());
    }

    fn assert_idempotent(request: &MergeRequest) {
        let first = merge_contents("A\nANCHOR\nB\n", request).expect("first");
        let second = merge_contents(&first.contents, request).expect("second");

        assert_eq!(second.contents, first.contents);
        assert!(!second.did_merge);
        assert_eq!(second.contents.matches("@generated begin").count(), 1);
    }

    #[test]
    fn empty_comment_is_idempotent() {
        assert_idempotent(&req("t", "X", "ANCHOR").comment(""));
    }

    #[test]
    fn tag_with_trailing_space_is_idempotent() {
        assert_idempotent(&req("t ", "X", "ANCHOR").comment("#"));
        assert_idempotent(&req("t ", "X", "ANCHOR").comment("#").indent(2));
    }

    #[test]
    fn comment_with_surrounding_spaces_is_idempotent() {
        assert_idempotent(&req("t", "X", "ANCHOR").comment(" #"));
        assert_idempotent(&req("t", "X", "ANCHOR").comment("// "));
    }

    #[test]
    fn empty_comment_stale_block_is_replaced() {
        let old = merge_contents("A\nANCHOR\nB\n", &req("t", "OLD", "ANCHOR").comment(""))
            .expect("old");
        let new = merge_contents(&old.contents, &req("t", "NEW", "ANCHOR").comment(""))
            .expect("new");

        assert!(new.did_clear);
        assert!(!new.contents.contains("OLD"));
        assert_eq!(new.contents.matches("@generated begin").count(), 1);
    }
}
