//! Domain value objects: template assets and where they land.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! The set of template resources is fixed at compile time; providers only
//! decide where the bytes come from.

use serde::Serialize;
use std::fmt;

// ── TemplateAsset ────────────────────────────────────────────────────────────

/// A template resource shipped with the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateAsset {
    GitIgnore,
    Board,
    Project,
    Schematic,
    FootprintLibTable,
    SymbolLibTable,
}

impl TemplateAsset {
    /// Every asset, in copy order.
    pub const ALL: [TemplateAsset; 6] = [
        Self::GitIgnore,
        Self::Board,
        Self::Project,
        Self::Schematic,
        Self::FootprintLibTable,
        Self::SymbolLibTable,
    ];

    /// File name of the resource inside a template collection.
    pub const fn source_name(self) -> &'static str {
        match self {
            Self::GitIgnore => "gitignore",
            Self::Board => "projectname.kicad_pcb",
            Self::Project => "projectname.pro",
            Self::Schematic => "projectname.sch",
            Self::FootprintLibTable => "fp-lib-table",
            Self::SymbolLibTable => "sym-lib-table",
        }
    }

    pub const fn destination(self) -> Destination {
        match self {
            Self::GitIgnore => Destination::Root,
            _ => Destination::Hardware,
        }
    }

    /// File name in the generated project.
    ///
    /// Design-tool files embed the project name; everything else keeps a
    /// fixed name.
    pub fn target_name(self, project_name: &str) -> String {
        match self {
            Self::GitIgnore => ".gitignore".to_owned(),
            Self::Board => format!("{project_name}.kicad_pcb"),
            Self::Project => format!("{project_name}.pro"),
            Self::Schematic => format!("{project_name}.sch"),
            Self::FootprintLibTable => "fp-lib-table".to_owned(),
            Self::SymbolLibTable => "sym-lib-table".to_owned(),
        }
    }

    pub const fn is_renamed(self) -> bool {
        matches!(self, Self::Board | Self::Project | Self::Schematic)
    }
}

impl fmt::Display for TemplateAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}

// ── Destination ──────────────────────────────────────────────────────────────

/// Directory of the planned layout a template asset is copied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Root,
    Hardware,
}
