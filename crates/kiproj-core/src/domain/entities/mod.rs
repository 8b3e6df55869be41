pub mod layout;
pub mod submodule;

pub use crate::domain::DomainError;
pub use layout::ProjectLayout;
pub use submodule::SubmoduleSpec;
