//! Port traits abstracting all I/O away from the steps.

use camino::Utf8Path;
use std::future::Future;

/// Whole-file text access to the generated native project.
pub trait ProjectFs: Send + Sync {
    fn read_to_string(
        &self,
        path: &Utf8Path,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;

    /// Replace the full contents of `path`.
    fn write(&self, path: &Utf8Path, contents: &str)
    -> impl Future<Output = anyhow::Result<()>> + Send;
}
