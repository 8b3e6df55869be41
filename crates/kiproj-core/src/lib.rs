//! kiproj Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the kiproj
//! KiCad project creator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           kiproj-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ProjectCreator)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Filesystem, TemplateProvider, Vcs)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    kiproj-adapters (Infrastructure)     │
//! │  (LocalFilesystem, GitCli, Embedded..)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectLayout, CreationPhase, Assets)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kiproj_core::prelude::*;
//!
//! let layout = ProjectLayout::plan(std::env::current_dir()?, "demo");
//! let report = ProjectCreator::new(layout, filesystem, templates, vcs)
//!     .with_submodules(SubmoduleSpec::defaults())?
//!     .create()?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CreationReport, ProjectCreator, SubmoduleOutcome,
        ports::{Filesystem, TemplateProvider, Vcs},
    };
    pub use crate::domain::{CreationPhase, ProjectLayout, SubmoduleSpec, TemplateAsset};
    pub use crate::error::{KiprojError, KiprojResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
