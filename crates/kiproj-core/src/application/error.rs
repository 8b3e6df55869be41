//! Application layer errors.
//!
//! These errors represent failures in orchestration, not domain rules.
//! Domain errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{CreationPhase, TemplateAsset};
use crate::error::ErrorCategory;

/// Errors that occur while creating a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project root already exists; nothing was changed.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A template resource could not be found by the provider.
    #[error("Template resource '{asset}' not found in {source_location}")]
    TemplateMissing {
        asset: TemplateAsset,
        source_location: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A version-control command ran but failed.
    #[error("`{command}` failed: {reason}")]
    VcsFailed { command: String, reason: String },

    /// The version-control program could not be started at all.
    #[error("Version control program '{program}' could not be started: {reason}")]
    VcsUnavailable { program: String, reason: String },

    /// A creation step was called before the step it depends on.
    #[error("Cannot run {operation} while the creation is {phase}")]
    OutOfOrder {
        operation: &'static str,
        phase: CreationPhase,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Nothing was changed on disk".into(),
            ],
            Self::TemplateMissing {
                asset,
                source_location,
            } => vec![
                format!("'{}' is missing from {}", asset, source_location),
                "Check --templates-dir or the templates.dir config entry".into(),
                "Omit --templates-dir to use the built-in templates".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::VcsFailed { command, .. } => vec![
                format!("'{}' returned an error", command),
                "Check the git output above for details".into(),
            ],
            Self::VcsUnavailable { program, .. } => vec![
                format!("Ensure '{}' is installed and in your PATH", program),
                "Or set vcs.program in your config file".into(),
            ],
            Self::OutOfOrder { .. } => vec!["This appears to be a bug in kiproj".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::VcsFailed { .. } | Self::VcsUnavailable { .. } => ErrorCategory::External,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::OutOfOrder { .. } => ErrorCategory::Internal,
        }
    }
}
