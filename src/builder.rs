//! Working-tree materialization and site generation

use tracing::info;

use crate::app::Application;
use crate::error::Result;
use crate::mirror::TRACKED_BRANCH;
use crate::runner::{Exec, ProcessRunner};
use crate::{SiteConfig, SiteSection};

/// Materializes a disposable working tree from the bare mirror, fetches the
/// theme, and runs the static-site generator into the publish root.
pub struct SiteBuilder<'a, R> {
    app: &'a Application,
    site: &'a SiteSection,
    runner: &'a R,
}

impl<'a, R: ProcessRunner> SiteBuilder<'a, R> {
    pub fn new(app: &'a Application, config: &'a SiteConfig, runner: &'a R) -> Self {
        Self {
            app,
            site: &config.site,
            runner,
        }
    }

    /// Full rebuild: wipe the working tree, check out the tracked branch,
    /// clone the theme fresh, and generate into the publish root. The
    /// publish root is overwritten in place, not swapped.
    pub async fn compile(&self) -> Result<()> {
        info!("Compiling {}", self.app.full_name());

        let source = self.app.source_dir();

        // Delete before create, so nothing from a prior build survives.
        if source.exists() {
            tokio::fs::remove_dir_all(source).await?;
        }
        tokio::fs::create_dir_all(source).await?;

        self.runner
            .run(
                &Exec::new("git")
                    .arg(format!("--git-dir={}", self.app.repo_dir().display()))
                    .arg(format!("--work-tree={}", source.display()))
                    .arg("checkout")
                    .arg("-q")
                    .arg("-f")
                    .arg(TRACKED_BRANCH),
            )
            .await?;

        // The theme is cloned on every build; there is no cached copy to go
        // stale, at the price of a network round trip per build.
        let theme_dir = source.join("themes").join(&self.site.theme);
        self.runner
            .run(
                &Exec::new("git")
                    .arg("clone")
                    .arg(&self.site.theme_url)
                    .arg(theme_dir.display().to_string())
                    .current_dir(source),
            )
            .await?;

        self.runner
            .run(
                &Exec::new(&self.site.generator)
                    .arg(format!("-d={}", self.app.public_dir().display()))
                    .arg(format!("-t={}", self.site.theme))
                    .current_dir(source),
            )
            .await
    }
}
