//! Template resource providers.

mod directory;
mod embedded;
mod memory;

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;
pub use memory::InMemoryTemplates;
