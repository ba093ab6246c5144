//! Submission model

use std::path::Path;

use crate::constants::DEFAULT_SOURCE_FILENAME;

/// A validated request to run some source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Source text handed to the engine
    pub code: String,
    /// Advisory label supplied by the caller
    pub filename: Option<String>,
}

impl Submission {
    /// Create a new submission
    pub fn new(code: impl Into<String>, filename: Option<String>) -> Self {
        Self {
            code: code.into(),
            filename,
        }
    }

    /// UTF-8 encoded length of the code
    pub fn code_bytes(&self) -> usize {
        self.code.len()
    }

    /// The caller's filename, unless it is missing, empty or the default label
    pub fn custom_filename(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .filter(|name| !name.is_empty() && *name != DEFAULT_SOURCE_FILENAME)
    }

    /// Name reported back as `source_file`.
    ///
    /// Only the final path component of a caller-supplied name is used. When
    /// the caller did not pick a name (or picked one with no usable final
    /// component) the workspace file name stands in.
    pub fn source_label(&self, workspace_name: &str) -> String {
        self.custom_filename()
            .and_then(basename)
            .unwrap_or(workspace_name)
            .to_string()
    }
}

fn basename(name: &str) -> Option<&str> {
    Path::new(name).file_name().and_then(|n| n.to_str())
}
