//! Core domain layer for kiproj.
//!
//! This module contains pure logic with no I/O. Everything that touches the
//! filesystem, template storage, or git goes through the ports defined in
//! the application layer.
//!
//! - **Layout planning**: [`ProjectLayout`] maps a project name to every path
//!   a creation will touch
//! - **Template assets**: the fixed set of files copied into a new project
//! - **Submodules**: the injectable list of linked libraries
//! - **Phases**: the state machine of one creation attempt
pub mod entities;
pub mod error;
pub mod phase;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    layout::{
        HARDWARE_DIR, INCLUDES_DIR, KEEP_MARKER, PROJECT_SPECIFIC_DIR, ProjectLayout,
    },
    submodule::SubmoduleSpec,
};

pub use error::{DomainError, ErrorCategory};
pub use phase::CreationPhase;
pub use value_objects::{Destination, TemplateAsset};
