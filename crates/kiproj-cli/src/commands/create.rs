//! Project creation, the default action of `kiproj <NAME>`.
//!
//! Responsibility: validate the name, pick the adapters the configuration
//! asks for, run the core [`ProjectCreator`] and display results. Rollback
//! and phase handling live in the core.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use kiproj_adapters::{DirectoryTemplates, EmbeddedTemplates, GitCli, LocalFilesystem};
use kiproj_core::{
    application::{CreationReport, ProjectCreator, ports::TemplateProvider},
    domain::{ProjectLayout, SubmoduleSpec},
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Characters that are reserved in file names on at least one platform KiCad
/// runs on.
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Execute project creation.
///
/// 1. Validate the project name
/// 2. Plan the layout in the current directory
/// 3. Resolve templates and the submodule list
/// 4. Early-exit if `--dry-run`
/// 5. Run the transactional creator
/// 6. Report the outcome
#[instrument(skip_all, fields(project = %name))]
pub fn execute(
    name: String,
    args: CreateArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    validate_project_name(&name)?;

    let layout = ProjectLayout::in_current_dir(&name)
        .with_cli_context(|| "Failed to determine the current directory")?;

    let submodules = if args.no_submodules {
        Vec::new()
    } else {
        config.submodules.clone()
    };
    let templates = select_templates(args.templates_dir.as_deref(), &config)?;

    if args.dry_run {
        let plan = DryRunPlan::new(&layout, templates.as_ref(), &submodules);
        return show_plan(&plan, &output);
    }

    let creator = ProjectCreator::new(
        layout,
        Box::new(LocalFilesystem::new()),
        templates,
        Box::new(GitCli::with_program(&config.vcs.program)),
    )
    .with_submodules(submodules)?;

    output.header(&format!("Creating '{name}'..."))?;
    let spinner = output.spinner("Copying templates and linking libraries");
    let result = creator.create();
    spinner.finish_and_clear();
    let report = result?;

    info!(root = %report.root().display(), "Project ready");
    show_report(&report, &output)
}

// ── Name validation ───────────────────────────────────────────────────────────

/// Check that `name` can be used as a single directory name and as the stem
/// of the KiCad files.
pub fn validate_project_name(name: &str) -> CliResult<()> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name == "." || name == ".." {
        Some("name cannot be '.' or '..'")
    } else if name.starts_with('.') {
        Some("name cannot start with '.'")
    } else if name.contains('/') || name.contains('\\') {
        Some("name cannot contain path separators")
    } else if name.contains(RESERVED_CHARS) {
        Some("name cannot contain any of < > : \" | ? *")
    } else if name.chars().any(char::is_control) {
        Some("name cannot contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

// ── Template selection ────────────────────────────────────────────────────────

/// `--templates-dir`, then `templates.dir`, then a discovered directory, then
/// the built-in templates.
fn select_templates(
    flag: Option<&Path>,
    config: &AppConfig,
) -> CliResult<Box<dyn TemplateProvider>> {
    if let Some(dir) = flag.or(config.templates.dir.as_deref()) {
        if !dir.is_dir() {
            return Err(CliError::TemplatesDirNotFound {
                path: dir.to_path_buf(),
            });
        }
        return Ok(Box::new(DirectoryTemplates::new(dir)));
    }

    Ok(match DirectoryTemplates::discover() {
        Some(found) => Box::new(found),
        None => Box::new(EmbeddedTemplates::new()),
    })
}

// ── Dry run ───────────────────────────────────────────────────────────────────

/// Everything a creation would do, computed without touching the disk.
#[derive(Debug, Serialize)]
struct DryRunPlan {
    project_name: String,
    root: PathBuf,
    exists: bool,
    directories: Vec<PathBuf>,
    files: Vec<PathBuf>,
    templates: String,
    missing_templates: Vec<String>,
    submodules: Vec<PlannedSubmodule>,
}

#[derive(Debug, Serialize)]
struct PlannedSubmodule {
    path: PathBuf,
    url: String,
}

impl DryRunPlan {
    fn new(
        layout: &ProjectLayout,
        templates: &dyn TemplateProvider,
        submodules: &[SubmoduleSpec],
    ) -> Self {
        let missing_templates = templates
            .missing_assets()
            .into_iter()
            .map(|asset| asset.source_name().to_owned())
            .collect();

        Self {
            project_name: layout.name().to_owned(),
            root: layout.root().to_path_buf(),
            exists: layout.root().exists(),
            directories: layout
                .directories()
                .iter()
                .map(|d| d.to_path_buf())
                .collect(),
            files: layout.planned_files(),
            templates: templates.describe(),
            missing_templates,
            submodules: submodules
                .iter()
                .map(|spec| PlannedSubmodule {
                    path: layout.submodule_path(spec),
                    url: spec.source_url().to_owned(),
                })
                .collect(),
        }
    }
}

fn show_plan(plan: &DryRunPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(plan)?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create '{}' at {}",
        plan.project_name,
        plan.root.display()
    ))?;
    if plan.exists {
        output.warning(&format!(
            "{} already exists; creation would be refused",
            plan.root.display()
        ))?;
    }

    output.header("Directories")?;
    for dir in &plan.directories {
        output.print(&format!("  {}", dir.display()))?;
    }
    output.header(&format!("Files (from {})", plan.templates))?;
    for file in &plan.files {
        output.print(&format!("  {}", file.display()))?;
    }
    for missing in &plan.missing_templates {
        output.warning(&format!("Template '{missing}' is missing"))?;
    }

    output.header("Submodules")?;
    if plan.submodules.is_empty() {
        output.print("  (none)")?;
    }
    for sub in &plan.submodules {
        output.print(&format!("  {} <- {}", sub.path.display(), sub.url))?;
    }
    Ok(())
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn show_report(report: &CreationReport, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    for failed in report.failed_submodules() {
        output.warning(&format!(
            "Library '{}' was not linked: {}",
            failed.path.display(),
            failed.reason.as_deref().unwrap_or("unknown reason")
        ))?;
    }

    output.success(&format!(
        "Project '{}' created at {}",
        report.project_name,
        report.root().display()
    ))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", report.project_name))?;
    output.print(&format!(
        "  kicad hardware/{}.pro",
        report.project_name
    ))?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
