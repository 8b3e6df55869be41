use std::path::{Component, Path, PathBuf};

use crate::domain::{
    entities::submodule::SubmoduleSpec,
    value_objects::{Destination, TemplateAsset},
};

pub const HARDWARE_DIR: &str = "hardware";
pub const INCLUDES_DIR: &str = "includes";
pub const PROJECT_SPECIFIC_DIR: &str = "ProjectSpecific.pretty";
/// Keeps the otherwise empty `ProjectSpecific.pretty` directory tracked by git.
pub const KEEP_MARKER: &str = ".gitkeep";

/// Every path a project creation will touch, derived once from the name.
///
/// Computing a layout performs no I/O and cannot fail.
///
/// # Precondition
///
/// `project_name` is a single, non-empty path segment (no separators, no
/// `..`). The planner does not check this; the CLI validates names before
/// they get here. A name that violates it produces paths that are still
/// joined faithfully; [`ProjectLayout::contains`] flags anything that ends up
/// outside `root`, and project creation refuses such a layout up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    name: String,
    root: PathBuf,
    hardware_dir: PathBuf,
    includes_dir: PathBuf,
    project_specific_dir: PathBuf,
}

impl ProjectLayout {
    /// Plan the layout of `project_name` inside `parent` (normally the
    /// current working directory).
    pub fn plan(parent: impl AsRef<Path>, project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let root = parent.as_ref().join(&name);
        let hardware_dir = root.join(HARDWARE_DIR);
        let includes_dir = hardware_dir.join(INCLUDES_DIR);
        let project_specific_dir = includes_dir.join(PROJECT_SPECIFIC_DIR);

        Self {
            name,
            root,
            hardware_dir,
            includes_dir,
            project_specific_dir,
        }
    }

    /// Plan `project_name` inside the process's current working directory.
    ///
    /// Reading the working directory is the only fallible part.
    pub fn in_current_dir(project_name: impl Into<String>) -> std::io::Result<Self> {
        Ok(Self::plan(std::env::current_dir()?, project_name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn hardware_dir(&self) -> &Path {
        &self.hardware_dir
    }

    pub fn includes_dir(&self) -> &Path {
        &self.includes_dir
    }

    pub fn project_specific_dir(&self) -> &Path {
        &self.project_specific_dir
    }

    /// Directories in creation order; each is the parent of the next.
    pub fn directories(&self) -> [&Path; 4] {
        [
            &self.root,
            &self.hardware_dir,
            &self.includes_dir,
            &self.project_specific_dir,
        ]
    }

    pub fn marker_file(&self) -> PathBuf {
        self.project_specific_dir.join(KEEP_MARKER)
    }

    /// Where `asset` is copied to.
    pub fn target_for(&self, asset: TemplateAsset) -> PathBuf {
        let dir = match asset.destination() {
            Destination::Root => &self.root,
            Destination::Hardware => &self.hardware_dir,
        };
        dir.join(asset.target_name(&self.name))
    }

    /// Path of a submodule relative to the project root, which is the form
    /// `git submodule add` expects when run inside the root.
    pub fn submodule_path(&self, spec: &SubmoduleSpec) -> PathBuf {
        Path::new(HARDWARE_DIR)
            .join(INCLUDES_DIR)
            .join(spec.relative_path())
    }

    /// Every file the template and marker steps will write, in write order.
    pub fn planned_files(&self) -> Vec<PathBuf> {
        TemplateAsset::ALL
            .into_iter()
            .map(|asset| self.target_for(asset))
            .chain(std::iter::once(self.marker_file()))
            .collect()
    }

    /// `true` if `path` is strictly below `root` without climbing out of it.
    pub fn contains(&self, path: &Path) -> bool {
        match path.strip_prefix(&self.root) {
            Ok(rest) => {
                rest.components().next().is_some()
                    && rest
                        .components()
                        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ProjectLayout {
        ProjectLayout::plan("/work", "demo")
    }

    #[test]
    fn plans_the_fixed_directory_chain() {
        let layout = layout();
        assert_eq!(layout.root(), Path::new("/work/demo"));
        assert_eq!(layout.hardware_dir(), Path::new("/work/demo/hardware"));
        assert_eq!(
            layout.includes_dir(),
            Path::new("/work/demo/hardware/includes")
        );
        assert_eq!(
            layout.project_specific_dir(),
            Path::new("/work/demo/hardware/includes/ProjectSpecific.pretty")
        );
    }

    #[test]
    fn directories_are_ordered_parent_first() {
        let layout = layout();
        let dirs = layout.directories();
        for pair in dirs.windows(2) {
            assert_eq!(pair[1].parent(), Some(pair[0]));
        }
    }

    #[test]
    fn everything_but_root_is_strictly_nested() {
        let layout = layout();
        assert!(!layout.contains(layout.root()));
        for dir in &layout.directories()[1..] {
            assert!(layout.contains(dir), "{}", dir.display());
        }
        for file in layout.planned_files() {
            assert!(layout.contains(&file), "{}", file.display());
        }
    }

    #[test]
    fn contains_rejects_escapes() {
        let layout = layout();
        assert!(!layout.contains(Path::new("/work/other")));
        assert!(!layout.contains(Path::new("/work/demo/../other")));
    }

    #[test]
    fn template_targets_use_project_name() {
        let layout = ProjectLayout::plan("/work", "foo");
        assert_eq!(
            layout.target_for(TemplateAsset::Board),
            Path::new("/work/foo/hardware/foo.kicad_pcb")
        );
        assert_eq!(
            layout.target_for(TemplateAsset::GitIgnore),
            Path::new("/work/foo/.gitignore")
        );
        assert_eq!(
            layout.target_for(TemplateAsset::SymbolLibTable),
            Path::new("/work/foo/hardware/sym-lib-table")
        );
    }

    #[test]
    fn marker_sits_in_project_specific_dir() {
        assert_eq!(
            layout().marker_file(),
            Path::new("/work/demo/hardware/includes/ProjectSpecific.pretty/.gitkeep")
        );
    }

    #[test]
    fn submodule_path_is_relative_to_root() {
        let spec = SubmoduleSpec::new("Parts.pretty", "https://example.com/parts.git");
        assert_eq!(
            layout().submodule_path(&spec),
            Path::new("hardware/includes/Parts.pretty")
        );
    }

    #[test]
    fn planning_is_deterministic() {
        assert_eq!(layout(), layout());
    }
}
