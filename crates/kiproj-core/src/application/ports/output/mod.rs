//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kiproj-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::TemplateAsset;
use crate::error::KiprojResult;

#[cfg(test)]
use mockall::automock;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kiproj_adapters::filesystem::LocalFilesystem` (production)
/// - `kiproj_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Directory creation is non-recursive: the creator makes each
///   directory of the layout itself, parent first
/// - Files are only ever written to fresh paths; `write_new_file` must refuse
///   to replace an existing file
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a single directory. The parent must already exist.
    fn create_dir(&self, path: &Path) -> KiprojResult<()>;

    /// Write bytes to a file that must not exist yet.
    fn write_new_file(&self, path: &Path, content: &[u8]) -> KiprojResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> KiprojResult<()>;
}

/// Port for template resources.
///
/// Implemented by:
/// - `kiproj_adapters::template_provider::EmbeddedTemplates` (compiled in)
/// - `kiproj_adapters::template_provider::DirectoryTemplates` (on disk)
/// - `kiproj_adapters::template_provider::InMemoryTemplates` (testing)
#[cfg_attr(test, automock)]
pub trait TemplateProvider: Send + Sync {
    /// Bytes of `asset`.
    ///
    /// Fails with `ApplicationError::TemplateMissing` when the provider has
    /// no such resource.
    fn fetch(&self, asset: TemplateAsset) -> KiprojResult<Vec<u8>>;

    /// Where resources come from, for messages and logs.
    fn describe(&self) -> String;

    /// Assets this provider cannot supply, in copy order.
    fn missing_assets(&self) -> Vec<TemplateAsset> {
        TemplateAsset::ALL
            .into_iter()
            .filter(|asset| self.fetch(*asset).is_err())
            .collect()
    }
}

/// Port for version control, run as an external process.
///
/// Implemented by:
/// - `kiproj_adapters::vcs::GitCli` (production)
/// - `kiproj_adapters::vcs::ScriptedVcs` (testing)
///
/// Every call blocks until the underlying command exits.
#[cfg_attr(test, automock)]
pub trait Vcs: Send + Sync {
    /// Initialise a repository in `repo_root`.
    fn init(&self, repo_root: &Path) -> KiprojResult<()>;

    /// Link `url` at `path` (relative to `repo_root`) as a submodule.
    fn add_submodule(&self, repo_root: &Path, url: &str, path: &Path) -> KiprojResult<()>;

    /// Stage every file in the working tree.
    fn stage_all(&self, repo_root: &Path) -> KiprojResult<()>;
}
