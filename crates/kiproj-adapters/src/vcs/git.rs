//! `git` driven as an external process.
//!
//! Each call blocks until git exits. No timeout is applied: a git process
//! that hangs hangs the tool. Terminal prompts are disabled so that an
//! unreachable or private submodule URL fails instead of waiting for
//! credentials.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use kiproj_core::{
    application::{ApplicationError, ports::Vcs},
    error::KiprojResult,
};
use tracing::{debug, instrument, trace};

/// Production VCS adapter running the `git` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    program: OsString,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable (name on `PATH` or absolute path).
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// `true` if `git --version` runs successfully.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    /// Build the command for `git <args>` run inside `repo_root`.
    pub fn build_command<I, S>(&self, repo_root: &Path, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(repo_root)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, mut cmd: Command) -> KiprojResult<Output> {
        let rendered = describe(&cmd);
        debug!(command = %rendered, "Running");

        let output = cmd.output().map_err(|e| self.spawn_error(e))?;
        trace!(
            command = %rendered,
            stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
            "Finished"
        );

        if !output.status.success() {
            return Err(ApplicationError::VcsFailed {
                command: rendered,
                reason: failure_reason(&output.stderr, output.status.code()),
            }
            .into());
        }
        Ok(output)
    }

    fn spawn_error(&self, e: io::Error) -> kiproj_core::error::KiprojError {
        ApplicationError::VcsUnavailable {
            program: self.program.to_string_lossy().into_owned(),
            reason: e.to_string(),
        }
        .into()
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcs for GitCli {
    #[instrument(skip(self), fields(repo = %repo_root.display()))]
    fn init(&self, repo_root: &Path) -> KiprojResult<()> {
        self.run(self.build_command(repo_root, ["init"]))?;
        Ok(())
    }

    #[instrument(skip(self), fields(repo = %repo_root.display()))]
    fn add_submodule(&self, repo_root: &Path, url: &str, path: &Path) -> KiprojResult<()> {
        let cmd = self.build_command(
            repo_root,
            [
                OsStr::new("submodule"),
                OsStr::new("add"),
                OsStr::new(url),
                path.as_os_str(),
            ],
        );
        // Output is only of interest when the command fails.
        self.run(cmd).map(drop)
    }

    #[instrument(skip(self), fields(repo = %repo_root.display()))]
    fn stage_all(&self, repo_root: &Path) -> KiprojResult<()> {
        self.run(self.build_command(repo_root, ["add", "."]))?;
        Ok(())
    }
}

/// `git submodule add <url> <path>` style rendering for messages.
fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first `fatal:` line names the cause; without one, every non-empty
/// stderr line is kept.
fn failure_reason(stderr: &[u8], code: Option<i32>) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if let Some(fatal) = lines.iter().find(|l| l.starts_with("fatal:")) {
        return (*fatal).to_owned();
    }
    match (lines.is_empty(), code) {
        (false, _) => lines.join("; "),
        (true, Some(code)) => format!("exit status {code}"),
        (true, None) => "terminated by signal".to_owned(),
    }
}
