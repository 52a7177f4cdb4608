//! Manifest persistence for path sets.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::model::PathSet;

/// Load a [`PathSet`] from a JSON manifest of the form `{"directories": [..], "files": [..]}`.
///
/// Either key may be omitted.
pub fn load(path: &Path) -> Result<PathSet> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest at {}", path.display()))?;
    let set = serde_json::from_str(&data)
        .with_context(|| format!("invalid manifest data in {}", path.display()))?;
    Ok(set)
}

/// Persist `set` as pretty-printed JSON, creating parent directories as needed.
pub fn save(path: &Path, set: &PathSet) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create manifest directory {}", dir.display()))?;
    }

    let data = serde_json::to_string_pretty(set).context("failed to serialize path set")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}
