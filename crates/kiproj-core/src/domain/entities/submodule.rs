use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Library directories under `hardware/includes` that every project links.
pub const DEFAULT_LIBRARIES: [&str; 3] = [
    "CrumpPrints.pretty",
    "CrumpPrintsSymbols.pretty",
    "CrumpSchemes",
];

pub const PLACEHOLDER_SOURCE_BASE: &str = "https://libraries.kiproj.invalid";

/// An external library linked into `hardware/includes` as a git submodule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmoduleSpec {
    /// Location relative to `hardware/includes`.
    relative_path: PathBuf,
    source_url: String,
}

impl SubmoduleSpec {
    pub fn new(relative_path: impl Into<PathBuf>, source_url: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            source_url: source_url.into(),
        }
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The shared libraries linked into every project unless configuration
    /// says otherwise.
    ///
    /// The paths are the fixed library layout. The URLs are placeholders
    /// under the reserved `.invalid` domain, so they fail fast instead of
    /// hitting the network: set `submodules` in the config file (written by
    /// `kiproj init`) to point them at real repositories. Until then every
    /// library is reported as not linked and creation still succeeds.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_LIBRARIES
            .iter()
            .map(|name| Self::new(*name, format!("{PLACEHOLDER_SOURCE_BASE}/{name}.git")))
            .collect()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let path = self.relative_path.display().to_string();

        if self.relative_path.as_os_str().is_empty() {
            return Err(DomainError::InvalidSubmodule {
                path,
                reason: "path is empty".into(),
            });
        }
        if self.source_url.trim().is_empty() {
            return Err(DomainError::InvalidSubmodule {
                path,
                reason: "source url is empty".into(),
            });
        }
        if !self
            .relative_path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(DomainError::EscapesProjectRoot {
                path: self.relative_path.clone(),
            });
        }

        Ok(())
    }

    /// Validate a whole list: every entry, plus no two entries sharing a path.
    pub fn validate_all(specs: &[Self]) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for spec in specs {
            spec.validate()?;
            if !seen.insert(spec.relative_path.as_path()) {
                return Err(DomainError::DuplicateSubmodule {
                    path: spec.relative_path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let defaults = SubmoduleSpec::defaults();
        assert_eq!(defaults.len(), 3);
        SubmoduleSpec::validate_all(&defaults).unwrap();
    }

    #[test]
    fn defaults_use_the_fixed_library_paths() {
        let paths: Vec<_> = SubmoduleSpec::defaults()
            .iter()
            .map(|spec| spec.relative_path().to_path_buf())
            .collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("CrumpPrints.pretty"),
                PathBuf::from("CrumpPrintsSymbols.pretty"),
                PathBuf::from("CrumpSchemes"),
            ]
        );
        assert!(
            SubmoduleSpec::defaults()
                .iter()
                .all(|spec| spec.source_url().starts_with(PLACEHOLDER_SOURCE_BASE))
        );
    }

    #[test]
    fn absolute_path_is_rejected() {
        let spec = SubmoduleSpec::new("/etc/libs", "https://example.com/libs.git");
        assert!(matches!(
            spec.validate(),
            Err(DomainError::EscapesProjectRoot { .. })
        ));
    }

    #[test]
    fn parent_dir_is_rejected() {
        let spec = SubmoduleSpec::new("../libs", "https://example.com/libs.git");
        assert!(matches!(
            spec.validate(),
            Err(DomainError::EscapesProjectRoot { .. })
        ));
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(SubmoduleSpec::new("", "https://example.com/x.git")
            .validate()
            .is_err());
        assert!(SubmoduleSpec::new("Libs", "  ").validate().is_err());
    }

    #[test]
    fn duplicates_are_rejected() {
        let specs = vec![
            SubmoduleSpec::new("Libs", "https://example.com/a.git"),
            SubmoduleSpec::new("Libs", "https://example.com/b.git"),
        ];
        assert_eq!(
            SubmoduleSpec::validate_all(&specs),
            Err(DomainError::DuplicateSubmodule {
                path: "Libs".into()
            })
        );
    }

    #[test]
    fn nested_relative_path_is_fine() {
        let spec = SubmoduleSpec::new("vendor/Libs", "https://example.com/libs.git");
        spec.validate().unwrap();
    }
}
