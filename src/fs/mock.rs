use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory file system; relative paths are resolved against `root`
pub struct MockFileSystem {
    entries: RwLock<HashMap<PathBuf, FileType>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            root,
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut entries, parent);
        }
        entries.insert(path, FileType::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        Self::ensure_parents(&mut entries, &path);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(entries: &mut HashMap<PathBuf, FileType>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            entries
                .entry(current.clone())
                .or_insert(FileType::Directory);
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.entries.read().unwrap().get(&path) == Some(&FileType::Directory)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let entries = self.entries.read().unwrap();

        match entries.get(&path) {
            Some(FileType::Directory) => {}
            Some(_) => return Err(anyhow!("Not a directory: {:?}", path)),
            None => return Err(anyhow!("Directory not found: {:?}", path)),
        }

        let mut result: Vec<DirEntry> = entries
            .iter()
            .filter(|(entry_path, _)| entry_path.parent() == Some(path.as_path()))
            .map(|(entry_path, file_type)| DirEntry {
                name: entry_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string(),
                file_type: *file_type,
            })
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dir_creates_parents() {
        let fs = MockFileSystem::new();
        fs.add_dir("conf/dev");

        assert!(fs.is_dir(Path::new("/mock/conf")));
        assert!(fs.is_dir(Path::new("/mock/conf/dev")));
    }

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("conf/README.md");

        let names: Vec<String> = fs
            .read_dir(Path::new("/mock/conf"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["README.md"]);
        assert!(!fs.is_dir(Path::new("/mock/conf/README.md")));
    }

    #[test]
    fn test_read_dir_lists_immediate_children() {
        let fs = MockFileSystem::new();
        fs.add_dir("conf/dev");
        fs.add_dir("conf/prod/nested");
        fs.add_file("conf/README.md");

        let entries = fs.read_dir(Path::new("/mock/conf")).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["README.md", "dev", "prod"]);
    }

    #[test]
    fn test_read_dir_missing_is_error() {
        let fs = MockFileSystem::new();
        assert!(fs.read_dir(Path::new("/mock/absent")).is_err());
    }

    #[test]
    fn test_with_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/opt"));
        fs.add_dir("conf/test");

        assert!(fs.is_dir(Path::new("/opt/conf/test")));
    }
}
