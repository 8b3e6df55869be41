//! Infrastructure adapters for kiproj.
//!
//! This crate implements the ports defined in `kiproj-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod template_provider;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_provider::{DirectoryTemplates, EmbeddedTemplates, InMemoryTemplates};
pub use vcs::{GitCli, ScriptedVcs, VcsCall};
