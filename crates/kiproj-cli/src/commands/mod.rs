//! Command handlers. Each translates parsed arguments into calls on the core
//! and adapters, then reports through the [`crate::output::OutputManager`].

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
