//! Template resources read from a directory on disk.
//!
//! # Resolution order
//!
//! [`DirectoryTemplates::discover`] tries these in order, stopping at the first directory
//! that exists:
//!
//! 1. **`$KIPROJ_TEMPLATES_DIR`**: environment variable override.
//! 2. **`<executable-dir>/templates`**: sibling to the `kiproj` binary, for
//!    installs that ship a `templates/` directory next to it.
//!
//! When nothing is found the caller falls back to the embedded templates.
//! An explicitly configured directory is not searched for: it is used as given, and
//! a resource missing from it is an error.

use std::io;
use std::path::{Path, PathBuf};

use kiproj_core::{
    application::{ApplicationError, ports::TemplateProvider},
    domain::TemplateAsset,
    error::KiprojResult,
};
use tracing::{debug, instrument};

pub const TEMPLATES_DIR_ENV: &str = "KIPROJ_TEMPLATES_DIR";

/// Reads `<dir>/<asset source name>` for each asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTemplates {
    dir: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Find a template directory using the documented resolution order.
    #[instrument]
    pub fn discover() -> Option<Self> {
        candidate_paths().into_iter().find_map(|candidate| {
            if candidate.is_dir() {
                debug!(path = %candidate.display(), "using templates directory");
                Some(Self::new(candidate))
            } else {
                debug!(path = %candidate.display(), "path does not exist, skipping");
                None
            }
        })
    }
}

impl TemplateProvider for DirectoryTemplates {
    fn fetch(&self, asset: TemplateAsset) -> KiprojResult<Vec<u8>> {
        let path = self.dir.join(asset.source_name());
        std::fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::TemplateMissing {
                asset,
                source_location: self.describe(),
            }
            .into(),
            _ => ApplicationError::FilesystemError {
                path,
                reason: format!("Failed to read template: {e}"),
            }
            .into(),
        })
    }

    fn describe(&self) -> String {
        format!("template directory {}", self.dir.display())
    }

    /// Checks for the files without reading them.
    fn missing_assets(&self) -> Vec<TemplateAsset> {
        TemplateAsset::ALL
            .into_iter()
            .filter(|asset| !self.dir.join(asset.source_name()).is_file())
            .collect()
    }
}

/// Build the ordered list of candidate paths to try.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Some(env_dir) = std::env::var_os(TEMPLATES_DIR_ENV) {
        paths.push(PathBuf::from(env_dir));
    }

    if let Some(exe_sibling) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
    {
        paths.push(exe_sibling);
    }

    paths
}
