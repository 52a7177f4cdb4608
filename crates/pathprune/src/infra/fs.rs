//! Filesystem access: path resolution and entry classification.

use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::domain::errors::PruneError;
use crate::domain::model::EntryKind;

/// Capability mapping a resolved path to the kind of entry it names.
///
/// Pruning only talks to the filesystem through this trait, so tests can substitute canned
/// answers. Any `Fn(&Path) -> Result<EntryKind, PruneError>` closure qualifies.
pub trait Classify {
    fn classify(&self, path: &Path) -> Result<EntryKind, PruneError>;
}

impl<F> Classify for F
where
    F: Fn(&Path) -> Result<EntryKind, PruneError>,
{
    fn classify(&self, path: &Path) -> Result<EntryKind, PruneError> {
        self(path)
    }
}

/// Classifies paths with a blocking `stat` against the host filesystem.
///
/// Symlinks are followed. Anything that is not a regular file counts as a directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsClassifier;

impl Classify for FsClassifier {
    fn classify(&self, path: &Path) -> Result<EntryKind, PruneError> {
        let metadata = fs::metadata(path).map_err(|err| PruneError::from_io(path, err))?;
        if metadata.is_file() {
            Ok(EntryKind::File)
        } else {
            Ok(EntryKind::Directory)
        }
    }
}

/// Resolve `raw` against the current directory and normalize it lexically.
pub fn resolve(raw: &str) -> io::Result<PathBuf> {
    let path = Path::new(raw);
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = env::current_dir()?;
    Ok(normalize(&cwd.join(path)))
}

/// Collapse `.` and `..` components and trailing separators without touching the disk.
///
/// `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Directory containing `path`; the root is its own parent.
pub fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(path)
}
