//! Application services - orchestrate use cases.
//!
//! `ProjectCreator` runs the transactional project-creation sequence.

pub mod creation_service;

pub use creation_service::{CreationReport, ProjectCreator, SubmoduleOutcome};
