//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use kiproj_core::{
    application::{ApplicationError, ports::Filesystem},
    error::KiprojResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a creator and inspect
/// the other afterwards.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new memory filesystem containing only `/`.
    pub fn new() -> Self {
        let mut inner = MemoryFilesystemInner::default();
        inner.directories.insert(PathBuf::from("/"));
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Create `path` and every missing ancestor (test setup helper).
    pub fn seed_dir(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.write().unwrap();
        let mut current = PathBuf::new();
        for component in path.as_ref().components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
    }

    /// Make every create/write at `path` fail, as a full disk or a denied
    /// permission would.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.inner.write().unwrap().failing.insert(path.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// Every file or directory at or below `path`.
    pub fn entries_under(&self, path: &Path) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .filter(|p| p.starts_with(path))
            .cloned()
            .collect()
    }

    fn check_writable(inner: &MemoryFilesystemInner, path: &Path) -> KiprojResult<()> {
        if inner.failing.contains(path) {
            return Err(fs_error(path, "injected failure"));
        }
        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(fs_error(path, "already exists"));
        }
        match path.parent() {
            Some(parent) if inner.directories.contains(parent) => Ok(()),
            _ => Err(fs_error(path, "Parent directory does not exist")),
        }
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn create_dir(&self, path: &Path) -> KiprojResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        Self::check_writable(&inner, path)?;
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_new_file(&self, path: &Path, content: &[u8]) -> KiprojResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;
        Self::check_writable(&inner, path)?;
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> KiprojResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        if !inner.directories.contains(path) {
            return Err(fs_error(path, "No such directory"));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

fn fs_error(path: &Path, reason: &str) -> kiproj_core::error::KiprojError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn lock_error(path: &Path) -> kiproj_core::error::KiprojError {
    fs_error(path, "filesystem lock poisoned")
}
