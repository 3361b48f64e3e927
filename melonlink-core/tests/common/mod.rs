//! Shared helpers for melonlink-core integration tests.

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route step traces to the test harness. `RUST_LOG=debug` shows them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A copy of a fixture project in a temp directory.
pub struct Project {
    _dir: TempDir,
    pub root: Utf8PathBuf,
}

impl Project {
    pub fn from_fixture(name: &str) -> Self {
        init_tracing();

        let src = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name);
        let dir = TempDir::new().expect("temp dir");
        copy_dir_all(&src, dir.path()).expect("copy fixture");

        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        Self { _dir: dir, root }
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root.join(rel)).expect("read project file")
    }

    pub fn write(&self, rel: &str, contents: &str) {
        fs::write(self.root.join(rel), contents).expect("write project file");
    }

    pub fn path(&self, rel: &str) -> Utf8PathBuf {
        self.root.join(rel)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

fn copy_dir_all(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let dst_path = dst.join(entry.file_name());
        if ty.is_dir() {
            copy_dir_all(&entry.path(), &dst_path)?;
        } else {
            fs::copy(entry.path(), dst_path)?;
        }
    }
    Ok(())
}
