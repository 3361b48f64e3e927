use crate::error::{EditError, EditResult};
use regex::Regex;
use std::fmt;
use std::ops::Range;

/// Reference point an anchor-merge inserts after.
#[derive(Debug, Clone)]
pub enum Anchor {
    Literal(String),
    Pattern(Regex),
}

impl Anchor {
    pub fn literal(text: impl Into<String>) -> Self {
        Anchor::Literal(text.into())
    }

    pub fn pattern(pattern: &str) -> EditResult<Self> {
        Regex::new(pattern)
            .map(Anchor::Pattern)
            .map_err(|source| EditError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Byte range of the first match in `haystack`.
    pub fn find(&self, haystack: &str) -> Option<Range<usize>> {
        match self {
            Anchor::Literal(text) => haystack
                .find(text.as_str())
                .map(|start| start..start + text.len()),
            Anchor::Pattern(re) => re.find(haystack).map(|m| m.range()),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Literal(text) => write!(f, "{text:?}"),
            Anchor::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}
