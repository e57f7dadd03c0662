//! Design documents addressed by path: `<store dir>/<design id>.json`.

use anyhow::{anyhow, Context, Result};
use artboard_model::Design;
use artboard_storage::{Envelope, PersistedDesign};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct DesignFile {
    pub store_dir: PathBuf,
    pub design_id: String,
}

impl DesignFile {
    pub fn parse(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Not a design file: {}", path.display()))?;
        let design_id = name
            .strip_suffix(".json")
            .filter(|stem| !stem.is_empty() && !stem.ends_with(".preview"))
            .ok_or_else(|| anyhow!("Design files are named <id>.json: {}", path.display()))?;

        let store_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            store_dir,
            design_id: design_id.to_string(),
        })
    }
}

/// Read and sanitize a design without going through a store
pub fn read_design(path: &Path) -> Result<Design> {
    let file = DesignFile::parse(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let envelope: Envelope<PersistedDesign> = serde_json::from_str(&text)
        .with_context(|| format!("Not a design document: {}", path.display()))?;

    let mut persisted = envelope.data;
    persisted.id.get_or_insert(file.design_id);
    Ok(persisted.into_design())
}

pub fn resolve(path: &Path, cwd: &str) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(cwd).join(path)
    }
}
