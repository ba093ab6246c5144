//! Temporary on-disk source files for submissions

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::constants::{WORKSPACE_PREFIX, WORKSPACE_SUFFIX};

/// Exclusively owned temporary file holding one submission's source.
///
/// The file is removed when the value is released or dropped, whichever
/// comes first. The engine only ever receives the path.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    released: bool,
}

impl Workspace {
    /// Create a new workspace file in `dir` containing exactly `content`.
    ///
    /// File creation runs on the blocking pool. If writing fails the partial
    /// file is removed before the error is returned.
    pub async fn acquire(dir: &Path, content: &str) -> io::Result<Self> {
        let dir = dir.to_path_buf();
        let content = content.to_owned();
        tokio::task::spawn_blocking(move || Self::acquire_blocking(&dir, content.as_bytes()))
            .await
            .map_err(io::Error::other)?
    }

    fn acquire_blocking(dir: &Path, content: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .suffix(WORKSPACE_SUFFIX)
            .tempfile_in(dir)?;

        file.write_all(content)?;
        file.flush()?;

        // Close our handle and take over removal from tempfile.
        let path = file.into_temp_path().keep()?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "Workspace created");

        Ok(Self {
            path,
            released: false,
        })
    }

    /// Full path handed to the engine
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, e.g. `sentinel-a1B2c3.c`
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Remove the workspace file. Never fails; problems are logged.
    pub fn release(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Workspace removed");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Workspace already gone");
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove workspace"
                );
            }
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.remove();
    }
}
