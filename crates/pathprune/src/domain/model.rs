//! Domain models for directory and file path sets.

use serde::{Deserialize, Serialize};

/// Two ordered lists of absolute paths: directories (each standing for everything beneath it) and
/// individual files.
///
/// The lists carry no invariant until [`PathSet::prune`] runs; afterwards no directory lies inside
/// another listed directory and no file lies inside a listed directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSet {
    #[serde(default)]
    directories: Vec<String>,
    #[serde(default)]
    files: Vec<String>,
}

impl PathSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from pre-populated lists.
    pub fn from_parts<D, F>(directories: D, files: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// Replace the directory list wholesale.
    pub fn set_directories(&mut self, directories: Vec<String>) {
        self.directories = directories;
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Replace the file list wholesale.
    pub fn set_files(&mut self, files: Vec<String>) {
        self.files = files;
    }

    /// Returns whether both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    /// Strip a leading `root` from every entry for display.
    ///
    /// Matching is literal, entries without the prefix are left alone, and list lengths never
    /// change. Trimmed entries are no longer absolute, so prune before trimming.
    pub fn trim_root(&mut self, root: &str) {
        let trim = |value: String| match value.strip_prefix(root) {
            Some(rest) => rest.to_owned(),
            None => value,
        };

        self.directories = std::mem::take(&mut self.directories)
            .into_iter()
            .map(trim)
            .collect();
        self.files = std::mem::take(&mut self.files)
            .into_iter()
            .map(trim)
            .collect();
    }
}

/// What a path refers to on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}
