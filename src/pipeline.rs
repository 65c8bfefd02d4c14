//! The init → fetch → compile build sequence

use crate::SiteConfig;
use crate::app::Application;
use crate::builder::SiteBuilder;
use crate::error::Result;
use crate::mirror::RepoMirror;
use crate::runner::ProcessRunner;

/// Sequences the mirror and builder operations for one rebuild. Stops at
/// the first failure; completed steps are not rolled back — a failed fetch
/// leaves the initialized mirror alone, and a failed compile leaves the
/// publish root at its last successful state.
pub struct Pipeline<'a, R> {
    mirror: RepoMirror<'a, R>,
    builder: SiteBuilder<'a, R>,
}

impl<'a, R: ProcessRunner> Pipeline<'a, R> {
    pub fn new(app: &'a Application, config: &'a SiteConfig, runner: &'a R) -> Self {
        Self {
            mirror: RepoMirror::new(app, runner),
            builder: SiteBuilder::new(app, config, runner),
        }
    }

    pub async fn update(&self) -> Result<()> {
        self.mirror.init().await?;
        self.mirror.fetch().await?;
        self.builder.compile().await
    }
}
