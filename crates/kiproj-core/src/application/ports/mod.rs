//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kiproj-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateProvider`: Template resource lookup
//!   - `Vcs`: Version control commands

pub mod output;

pub use output::{Filesystem, TemplateProvider, Vcs};

#[cfg(test)]
pub use output::{MockTemplateProvider, MockVcs};
