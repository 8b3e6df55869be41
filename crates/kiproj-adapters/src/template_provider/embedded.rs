//! Template resources compiled into the binary.

use kiproj_core::{application::ports::TemplateProvider, domain::TemplateAsset, error::KiprojResult};

/// The KiCad 5 project template that ships with kiproj.
///
/// Always complete; it is the fallback when no template directory is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }

    /// Raw bytes of `asset`.
    pub fn bytes(asset: TemplateAsset) -> &'static [u8] {
        match asset {
            TemplateAsset::GitIgnore => include_bytes!("../../templates/kicad/gitignore"),
            TemplateAsset::Board => include_bytes!("../../templates/kicad/projectname.kicad_pcb"),
            TemplateAsset::Project => include_bytes!("../../templates/kicad/projectname.pro"),
            TemplateAsset::Schematic => include_bytes!("../../templates/kicad/projectname.sch"),
            TemplateAsset::FootprintLibTable => include_bytes!("../../templates/kicad/fp-lib-table"),
            TemplateAsset::SymbolLibTable => include_bytes!("../../templates/kicad/sym-lib-table"),
        }
    }
}

impl TemplateProvider for EmbeddedTemplates {
    fn fetch(&self, asset: TemplateAsset) -> KiprojResult<Vec<u8>> {
        Ok(Self::bytes(asset).to_vec())
    }

    fn describe(&self) -> String {
        "built-in templates".into()
    }
}
