//! Project Creator - the transactional creation sequence.
//!
//! One [`ProjectCreator`] creates one project:
//! 1. Create the directory chain of the [`ProjectLayout`]
//! 2. Copy the template resources into it
//! 3. Initialise git, attach submodules, stage everything
//!
//! Either all three steps succeed or the project root is removed again. The
//! error that triggered the rollback is always returned to the caller.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateProvider, Vcs},
    },
    domain::{CreationPhase, DomainError, ProjectLayout, SubmoduleSpec, TemplateAsset},
    error::KiprojResult,
};

/// Result of attaching one submodule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmoduleOutcome {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub url: String,
    pub attached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Summary of a completed creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationReport {
    pub project_name: String,
    pub root: PathBuf,
    pub submodules: Vec<SubmoduleOutcome>,
}

impl CreationReport {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn failed_submodules(&self) -> impl Iterator<Item = &SubmoduleOutcome> {
        self.submodules.iter().filter(|s| !s.attached)
    }
}

/// Creates a single project with all-or-nothing visibility on disk.
///
/// The creator is single-use: [`ProjectCreator::create`] consumes it. The
/// individual steps are public so callers can drive the sequence themselves;
/// they must be called in order and refuse to run otherwise.
///
/// If the creator is dropped while a panic unwinds and directory creation
/// had begun, the project root is removed as well. A process killed by a
/// signal gets no cleanup.
pub struct ProjectCreator {
    layout: ProjectLayout,
    submodules: Vec<SubmoduleSpec>,
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateProvider>,
    vcs: Box<dyn Vcs>,
    phase: CreationPhase,
    outcomes: Vec<SubmoduleOutcome>,
}

impl ProjectCreator {
    /// Create a new creator for `layout` with the given adapters.
    ///
    /// The built-in submodule list is used until
    /// [`with_submodules`](Self::with_submodules) replaces it.
    pub fn new(
        layout: ProjectLayout,
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateProvider>,
        vcs: Box<dyn Vcs>,
    ) -> Self {
        Self {
            layout,
            submodules: SubmoduleSpec::defaults(),
            filesystem,
            templates,
            vcs,
            phase: CreationPhase::Unstarted,
            outcomes: Vec::new(),
        }
    }

    /// Replace the list of libraries linked as submodules.
    pub fn with_submodules(mut self, submodules: Vec<SubmoduleSpec>) -> KiprojResult<Self> {
        SubmoduleSpec::validate_all(&submodules)?;
        self.submodules = submodules;
        Ok(self)
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn phase(&self) -> CreationPhase {
        self.phase
    }

    pub fn submodules(&self) -> &[SubmoduleSpec] {
        &self.submodules
    }

    /// Run the whole sequence, rolling back on failure.
    #[instrument(
        skip_all,
        fields(
            project = %self.layout.name(),
            root = %self.layout.root().display()
        )
    )]
    pub fn create(mut self) -> KiprojResult<CreationReport> {
        info!("Creating project");

        match self.run_all() {
            Ok(()) => {
                info!(
                    submodules = self.outcomes.len(),
                    failed = self.outcomes.iter().filter(|o| !o.attached).count(),
                    "Project created"
                );
                Ok(CreationReport {
                    project_name: self.layout.name().to_owned(),
                    root: self.layout.root().to_path_buf(),
                    submodules: std::mem::take(&mut self.outcomes),
                })
            }
            Err(e) => {
                if self.phase.requires_rollback() {
                    warn!(error = %e, phase = %self.phase, "Creation failed, rolling back");
                    self.rollback();
                }
                Err(e)
            }
        }
    }

    /// Create the directory chain.
    ///
    /// Fails with `ProjectExists` and touches nothing if the project root is
    /// already there, and with `EscapesProjectRoot` if any planned file would
    /// land outside it.
    #[instrument(skip_all)]
    pub fn setup_dirs(&mut self) -> KiprojResult<()> {
        self.expect_phase(CreationPhase::Unstarted, "setup_dirs")?;

        if let Some(stray) = self
            .layout
            .planned_files()
            .into_iter()
            .find(|path| !self.layout.contains(path))
        {
            self.phase.transition(CreationPhase::FailedPrecondition)?;
            return Err(DomainError::EscapesProjectRoot { path: stray }.into());
        }

        let root = self.layout.root();
        if self.filesystem.exists(root) {
            self.phase.transition(CreationPhase::FailedPrecondition)?;
            return Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into());
        }

        // From here on anything under root belongs to this attempt.
        self.phase.transition(CreationPhase::DirsCreating)?;
        info!(path = %root.display(), "Creating file structure");

        let [root, nested @ ..] = self.layout.directories();
        if let Err(e) = self.filesystem.create_dir(root) {
            if self.filesystem.exists(root) {
                // Someone else created it after the existence check.
                self.phase.transition(CreationPhase::FailedPrecondition)?;
                return Err(ApplicationError::ProjectExists {
                    path: root.to_path_buf(),
                }
                .into());
            }
            return Err(e);
        }

        for dir in nested {
            debug!(path = %dir.display(), "Creating directory");
            self.filesystem.create_dir(dir)?;
        }

        self.phase.transition(CreationPhase::DirsDone)?;
        Ok(())
    }

    /// Copy every template asset into the new tree.
    #[instrument(skip_all, fields(source = %self.templates.describe()))]
    pub fn copy_project_template(&mut self) -> KiprojResult<()> {
        self.expect_phase(CreationPhase::DirsDone, "copy_project_template")?;
        self.phase.transition(CreationPhase::TemplateCopying)?;

        for asset in TemplateAsset::ALL {
            let content = self.templates.fetch(asset)?;
            let target = self.layout.target_for(asset);
            debug!(%asset, target = %target.display(), bytes = content.len(), "Copying template");
            self.filesystem.write_new_file(&target, &content)?;
        }

        info!(files = TemplateAsset::ALL.len(), "Template copied");
        self.phase.transition(CreationPhase::TemplateDone)?;
        Ok(())
    }

    /// Initialise the repository, attach submodules and stage all files.
    ///
    /// A submodule that cannot be attached is logged and recorded; it never
    /// fails the step. `init` and staging failures do.
    #[instrument(skip_all)]
    pub fn setup_git(&mut self) -> KiprojResult<()> {
        self.expect_phase(CreationPhase::TemplateDone, "setup_git")?;
        self.phase.transition(CreationPhase::GitSetup)?;

        self.filesystem
            .write_new_file(&self.layout.marker_file(), b"")?;

        let root = self.layout.root();
        self.vcs.init(root)?;

        let mut outcomes = Vec::with_capacity(self.submodules.len());
        for spec in &self.submodules {
            let path = self.layout.submodule_path(spec);
            let url = spec.source_url();

            let outcome = match self.vcs.add_submodule(root, url, &path) {
                Ok(()) => {
                    info!(path = %path.display(), url, "Submodule attached");
                    SubmoduleOutcome {
                        path,
                        url: url.to_owned(),
                        attached: true,
                        reason: None,
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), url, error = %e, "Submodule not attached, continuing");
                    SubmoduleOutcome {
                        path,
                        url: url.to_owned(),
                        attached: false,
                        reason: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }
        self.outcomes = outcomes;

        self.vcs.stage_all(root)?;

        self.phase.transition(CreationPhase::Complete)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run_all(&mut self) -> KiprojResult<()> {
        self.setup_dirs()?;
        self.copy_project_template()?;
        self.setup_git()
    }

    fn expect_phase(&self, expected: CreationPhase, operation: &'static str) -> KiprojResult<()> {
        if self.phase != expected {
            return Err(ApplicationError::OutOfOrder {
                operation,
                phase: self.phase,
            }
            .into());
        }
        Ok(())
    }

    /// Best-effort removal of the project root.
    fn rollback(&mut self) {
        let root = self.layout.root();

        let removed = if self.filesystem.exists(root) {
            self.filesystem.remove_dir_all(root)
        } else {
            Ok(())
        };

        match removed {
            Ok(()) => {
                info!(path = %root.display(), "Rollback successful");
                if let Err(e) = self.phase.transition(CreationPhase::RolledBack) {
                    warn!(error = %e, "Unexpected phase after rollback");
                }
            }
            Err(e) => error!(
                error = %e,
                path = %root.display(),
                "Rollback failed, the project directory was left behind"
            ),
        }
    }
}

impl Drop for ProjectCreator {
    fn drop(&mut self) {
        if std::thread::panicking() && self.phase.requires_rollback() {
            warn!(phase = %self.phase, "Creation interrupted by a panic, rolling back");
            self.rollback();
        }
    }
}

impl std::fmt::Debug for ProjectCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectCreator")
            .field("layout", &self.layout)
            .field("submodules", &self.submodules)
            .field("templates", &self.templates.describe())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
