//! Application layer for kiproj.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`ProjectCreator`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; path planning and
//! phase rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CreationReport, ProjectCreator, SubmoduleOutcome};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateProvider, Vcs};

pub use error::ApplicationError;
