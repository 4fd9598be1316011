//! Deployment targets: the subdirectories of the database config directory

use crate::fs::FileSystem;
use std::path::{Path, PathBuf};

/// Environment stages in the order targets are offered
const STAGES: &[&str] = &["dev", "tst", "test", "acc", "prod", "prd"];

/// Outcome of listing the config directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetListing {
    Found(Vec<String>),
    /// The directory is absent; treated as having no targets
    DirectoryMissing,
}

impl TargetListing {
    pub fn into_targets(self) -> Vec<String> {
        match self {
            TargetListing::Found(targets) => targets,
            TargetListing::DirectoryMissing => Vec::new(),
        }
    }
}

/// Immediate subdirectories of `dir`, sorted by [`target_order`].
///
/// Regular files are skipped. An unreadable directory is reported the same
/// way as a missing one.
pub fn list_targets(fs: &dyn FileSystem, dir: &Path) -> TargetListing {
    if !fs.is_dir(dir) {
        return TargetListing::DirectoryMissing;
    }
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return TargetListing::DirectoryMissing,
    };

    let mut targets: Vec<String> = entries
        .into_iter()
        .filter(|e| e.is_dir())
        .map(|e| e.name)
        .collect();
    targets.sort_by_cached_key(|t| target_order(t));
    TargetListing::Found(targets)
}

/// Sort key: rank of the first stage keyword contained in the name, then the name.
///
/// Names without a stage keyword sort after all staged names.
pub fn target_order(name: &str) -> (usize, String) {
    let lower = name.to_lowercase();
    let rank = STAGES
        .iter()
        .position(|stage| lower.contains(stage))
        .unwrap_or(STAGES.len());
    (rank, lower)
}

/// Undo Maven's escaping of a Windows path in `db.config.dir`:
/// `C\:\\dev\\conf` becomes `C:\dev\conf`.
pub fn normalize_config_dir(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace("\\:", ":").replace("\\\\", "\\"))
}
