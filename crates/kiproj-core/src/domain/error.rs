// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::phase::CreationPhase;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `KiprojError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid submodule '{path}': {reason}")]
    InvalidSubmodule { path: String, reason: String },

    #[error("Duplicate submodule path: {path}")]
    DuplicateSubmodule { path: String },

    #[error("Path escapes the project root: {path}")]
    EscapesProjectRoot { path: PathBuf },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Invalid creation phase transition: {from} -> {to}")]
    InvalidPhaseTransition {
        from: CreationPhase,
        to: CreationPhase,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSubmodule { path, reason } => vec![
                format!("Submodule '{}' is misconfigured: {}", path, reason),
                "Submodule paths are relative to hardware/includes".into(),
                "Check the [[submodules]] entries in your config file".into(),
            ],
            Self::DuplicateSubmodule { path } => vec![
                format!("'{}' is listed more than once", path),
                "Remove the duplicate [[submodules]] entry".into(),
            ],
            Self::EscapesProjectRoot { path } => vec![
                format!("'{}' would be created outside the project", path.display()),
                "Use a plain relative path without '..'".into(),
            ],
            Self::InvalidPhaseTransition { .. } => vec![
                "This appears to be a bug in kiproj".into(),
                "Please report this issue".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSubmodule { .. }
            | Self::DuplicateSubmodule { .. }
            | Self::EscapesProjectRoot { .. } => ErrorCategory::Validation,
            Self::InvalidPhaseTransition { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
