//! Line-splice: insert a fragment at a fixed offset from a located line.
//!
//! Used for procedural source files where no single anchor line marks the
//! insertion point and the fragment has to skip a known block after the match.

use crate::error::{EditError, EditResult};
use crate::markers::{begin_marker, end_marker, is_begin_line, is_end_line, marker_text};
use crate::text::{LineEnding, indent_fragment};
use std::fmt;
use tracing::debug;

/// How a marker line is recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinePredicate {
    Exact(String),
    Contains(String),
}

impl LinePredicate {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            LinePredicate::Exact(s) => line == s,
            LinePredicate::Contains(s) => line.contains(s.as_str()),
        }
    }
}

impl fmt::Display for LinePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinePredicate::Exact(s) => write!(f, "line == {s:?}"),
            LinePredicate::Contains(s) => write!(f, "line contains {s:?}"),
        }
    }
}

/// Index of the first line satisfying `predicate`.
pub fn find_line(lines: &[String], predicate: &LinePredicate) -> Option<usize> {
    lines.iter().position(|line| predicate.matches(line))
}

/// Insert `fragment` as one element at `match + offset`.
///
/// The insertion index is clamped to `lines.len()`. Not idempotent; see
/// [`splice_block`] for the tag-guarded form.
pub fn splice_lines(
    lines: &[String],
    predicate: &LinePredicate,
    fragment: &str,
    offset: usize,
) -> EditResult<Vec<String>> {
    let found = find_line(lines, predicate).ok_or_else(|| EditError::MissingMarkerLine {
        predicate: predicate.to_string(),
    })?;

    let at = (found + offset).min(lines.len());
    let mut out = Vec::with_capacity(lines.len() + 1);
    out.extend_from_slice(&lines[..at]);
    out.push(fragment.to_string());
    out.extend_from_slice(&lines[at..]);
    Ok(out)
}

/// Tag-guarded splice request.
#[derive(Debug, Clone)]
pub struct SpliceRequest {
    pub tag: String,
    pub fragment: String,
    pub predicate: LinePredicate,
    pub offset: usize,
    pub comment: String,
    pub line_ending: LineEnding,
}

impl SpliceRequest {
    pub fn new(
        tag: impl Into<String>,
        fragment: impl Into<String>,
        predicate: LinePredicate,
        offset: usize,
    ) -> Self {
        Self {
            tag: tag.into(),
            fragment: fragment.into(),
            predicate,
            offset,
            comment: "//".to_string(),
            line_ending: LineEnding::Lf,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn line_ending(mut self, eol: LineEnding) -> Self {
        self.line_ending = eol;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    pub lines: Vec<String>,
    pub did_splice: bool,
    pub did_clear: bool,
}

/// Splice `req.fragment` fenced by tag markers.
///
/// An up-to-date block for the tag makes this a no-op; a stale one is removed
/// before the predicate is searched.
pub fn splice_block(lines: &[String], req: &SpliceRequest) -> EditResult<SpliceOutcome> {
    let header = begin_marker(&req.comment, &req.tag, &req.fragment);
    let existing = find_block(lines, &req.comment, &req.tag);

    if let Some((_, _, current)) = &existing
        && current == marker_text(&header)
    {
        debug!(tag = %req.tag, "spliced block up to date");
        return Ok(SpliceOutcome {
            lines: lines.to_vec(),
            did_splice: false,
            did_clear: false,
        });
    }

    let base: Vec<String> = match &existing {
        Some((start, end, _)) => {
            debug!(tag = %req.tag, "removing stale spliced block");
            lines[..*start]
                .iter()
                .chain(&lines[end + 1..])
                .cloned()
                .collect()
        }
        None => lines.to_vec(),
    };

    let eol = req.line_ending.as_str();
    let block = [
        header,
        indent_fragment(&req.fragment, 0, req.line_ending),
        end_marker(&req.comment, &req.tag),
    ]
    .join(eol);

    let spliced = splice_lines(&base, &req.predicate, &block, req.offset)?;
    Ok(SpliceOutcome {
        lines: spliced,
        did_splice: true,
        did_clear: existing.is_some(),
    })
}

/// Element range `[start, end]` of the block for `tag` plus its begin line.
///
/// Elements may themselves hold several lines when a block was spliced
/// earlier in the same pass.
fn find_block(lines: &[String], comment: &str, tag: &str) -> Option<(usize, usize, String)> {
    let mut open: Option<(usize, String)> = None;

    for (i, element) in lines.iter().enumerate() {
        for line in element.split('\n') {
            if is_begin_line(line, comment, tag) {
                open = Some((i, marker_text(line).to_string()));
            } else if is_end_line(line, comment, tag)
                && let Some((start, header)) = open.take()
            {
                return Some((start, i, header));
            }
        }
    }

    None
}
