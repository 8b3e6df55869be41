//! Scripted VCS double for testing.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use kiproj_core::{
    application::{ApplicationError, ports::Vcs},
    error::KiprojResult,
};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Init(PathBuf),
    AddSubmodule {
        repo_root: PathBuf,
        url: String,
        path: PathBuf,
    },
    StageAll(PathBuf),
}

/// Records every call and fails the ones it is told to.
///
/// With [`ScriptedVcs::touching_disk`], `init` also creates `<root>/.git` and
/// an attached submodule creates its directory, so rollback of VCS artifacts
/// can be observed on a real filesystem.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVcs {
    inner: Arc<Mutex<ScriptedVcsInner>>,
}

#[derive(Debug, Default)]
struct ScriptedVcsInner {
    calls: Vec<VcsCall>,
    fail_init: bool,
    fail_stage: bool,
    failing_urls: HashSet<String>,
    touch_disk: bool,
}

impl ScriptedVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touching_disk(self) -> Self {
        self.inner.lock().unwrap().touch_disk = true;
        self
    }

    pub fn failing_init(self) -> Self {
        self.inner.lock().unwrap().fail_init = true;
        self
    }

    pub fn failing_stage(self) -> Self {
        self.inner.lock().unwrap().fail_stage = true;
        self
    }

    /// Fail `submodule add` for `url`, as an unreachable host would.
    pub fn failing_url(self, url: impl Into<String>) -> Self {
        self.inner.lock().unwrap().failing_urls.insert(url.into());
        self
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// URLs passed to `submodule add`, in call order.
    pub fn attempted_urls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                VcsCall::AddSubmodule { url, .. } => Some(url),
                _ => None,
            })
            .collect()
    }
}

fn failed(command: &str, reason: &str) -> kiproj_core::error::KiprojError {
    ApplicationError::VcsFailed {
        command: command.into(),
        reason: reason.into(),
    }
    .into()
}

fn touch_dir(path: &Path) -> KiprojResult<()> {
    std::fs::create_dir_all(path).map_err(|e| {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

impl Vcs for ScriptedVcs {
    fn init(&self, repo_root: &Path) -> KiprojResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(VcsCall::Init(repo_root.to_path_buf()));
        if inner.fail_init {
            return Err(failed("git init", "scripted failure"));
        }
        if inner.touch_disk {
            touch_dir(&repo_root.join(".git"))?;
        }
        Ok(())
    }

    fn add_submodule(&self, repo_root: &Path, url: &str, path: &Path) -> KiprojResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(VcsCall::AddSubmodule {
            repo_root: repo_root.to_path_buf(),
            url: url.to_owned(),
            path: path.to_path_buf(),
        });
        if inner.failing_urls.contains(url) {
            return Err(failed(
                "git submodule add",
                "fatal: unable to access: Could not resolve host",
            ));
        }
        if inner.touch_disk {
            touch_dir(&repo_root.join(path))?;
        }
        Ok(())
    }

    fn stage_all(&self, repo_root: &Path) -> KiprojResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(VcsCall::StageAll(repo_root.to_path_buf()));
        if inner.fail_stage {
            return Err(failed("git add .", "scripted failure"));
        }
        Ok(())
    }
}
