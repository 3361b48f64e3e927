//! Staged file contents and unified-diff preview.

use camino::{Utf8Path, Utf8PathBuf};
use diffy::{DiffOptions, PatchFormatter};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    pub before: String,
    pub after: String,
}

impl FilePatch {
    pub fn is_changed(&self) -> bool {
        self.before != self.after
    }
}

/// Before/after contents for every file a step touched, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSet {
    files: BTreeMap<Utf8PathBuf, FilePatch>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record new contents for `path`. Staging a path twice keeps the first
    /// `before`, so chained edits diff against the on-disk original.
    pub fn stage(&mut self, path: impl Into<Utf8PathBuf>, before: String, after: String) {
        self.files
            .entry(path.into())
            .and_modify(|p| p.after = after.clone())
            .or_insert(FilePatch { before, after });
    }

    pub fn get(&self, path: &Utf8Path) -> Option<&FilePatch> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files whose staged contents differ from the original.
    pub fn changed(&self) -> impl Iterator<Item = (&Utf8Path, &FilePatch)> {
        self.files
            .iter()
            .filter(|(_, p)| p.is_changed())
            .map(|(path, p)| (path.as_path(), p))
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    pub fn extend(&mut self, other: PatchSet) {
        for (path, p) in other.files {
            self.stage(path, p.before, p.after);
        }
    }

    /// Unified diff of every changed file, paths shown relative to `root`.
    pub fn render_patch(&self, root: &Utf8Path) -> String {
        let mut out = String::new();
        let formatter = PatchFormatter::new();

        for (path, p) in self.changed() {
            let shown = path.strip_prefix(root).unwrap_or(path);

            out.push_str(&format!("diff --git a/{0} b/{0}\n", shown));

            // The formatter writes the `---`/`+++` header from these names.
            let patch = DiffOptions::new()
                .set_original_filename(format!("a/{shown}"))
                .set_modified_filename(format!("b/{shown}"))
                .create_patch(&p.before, &p.after);
            out.push_str(&formatter.fmt_patch(&patch).to_string());
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }
}
