//! Version control adapters.

mod git;
mod scripted;

pub use git::GitCli;
pub use scripted::{ScriptedVcs, VcsCall};
