//! The persistent bare mirror of the tracked repository

use tracing::{debug, info};

use crate::app::Application;
use crate::error::Result;
use crate::runner::{Exec, ProcessRunner};

/// The branch mirrored and checked out. The upstream contract fixes it.
pub const TRACKED_BRANCH: &str = "master";

/// Owns the bare repository at the application's repo path. The mirror is
/// created once and never deleted; an existing directory is assumed to be a
/// valid repository with an `origin` remote and is not re-validated.
pub struct RepoMirror<'a, R> {
    app: &'a Application,
    runner: &'a R,
}

impl<'a, R: ProcessRunner> RepoMirror<'a, R> {
    pub fn new(app: &'a Application, runner: &'a R) -> Self {
        Self { app, runner }
    }

    fn git(&self) -> Exec {
        Exec::new("git").arg(format!("--git-dir={}", self.app.repo_dir().display()))
    }

    /// Idempotent: creates and wires up the bare repository on first run,
    /// does nothing when the directory already exists.
    pub async fn init(&self) -> Result<()> {
        if self.app.repo_dir().exists() {
            return Ok(());
        }

        info!("Initializing {}", self.app.full_name());
        debug!("Repo: {}", self.app.repo_dir().display());
        debug!("Source: {}", self.app.source_dir().display());
        debug!("Public: {}", self.app.public_dir().display());

        tokio::fs::create_dir_all(self.app.repo_dir()).await?;
        self.runner.run(&self.git().arg("init")).await?;
        self.runner
            .run(
                &self
                    .git()
                    .arg("remote")
                    .arg("add")
                    .arg("origin")
                    .arg(self.app.clone_url()),
            )
            .await
    }

    /// Force-fetches origin's tracked branch into the local ref, overwriting
    /// any divergence (mirror semantics, not merge semantics).
    pub async fn fetch(&self) -> Result<()> {
        info!("Fetching {}", self.app.full_name());
        self.runner
            .run(
                &self
                    .git()
                    .arg("fetch")
                    .arg("-f")
                    .arg("origin")
                    .arg(format!("{TRACKED_BRANCH}:{TRACKED_BRANCH}")),
            )
            .await
    }
}
