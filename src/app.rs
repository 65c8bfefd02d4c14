//! The tracked repository and its filesystem roots

use std::path::{Path, PathBuf};

use crate::SiteConfig;
use crate::error::{Error, Result};

/// One tracked repository plus the three directories the pipeline drives:
/// the bare mirror, the disposable working tree, and the publish root.
/// Immutable; constructed once at startup from configuration.
#[derive(Debug, Clone)]
pub struct Application {
    pub service: String,
    pub user: String,
    pub name: String,
    repo_dir: PathBuf,
    source_dir: PathBuf,
    public_dir: PathBuf,
}

impl Application {
    /// Parses the `"service/user/name"` coordinate and resolves the three
    /// roots to absolute paths.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let mut parts = config.site.repo.split('/');
        let (Some(service), Some(user), Some(name), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::Config(format!(
                "repo must be 'service/user/name', got '{}'",
                config.site.repo
            )));
        };
        if service.is_empty() || user.is_empty() || name.is_empty() {
            return Err(Error::Config(format!(
                "repo must be 'service/user/name', got '{}'",
                config.site.repo
            )));
        }

        Ok(Self {
            service: service.to_string(),
            user: user.to_string(),
            name: name.to_string(),
            repo_dir: std::path::absolute(&config.core.repo)?,
            source_dir: std::path::absolute(&config.core.source)?,
            public_dir: std::path::absolute(&config.core.public)?,
        })
    }

    /// SSH clone URL of the tracked repository.
    pub fn clone_url(&self) -> String {
        format!("git@{}:{}/{}.git", self.service, self.user, self.name)
    }

    /// `"user/name"`, as it appears in webhook payloads.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.user, self.name)
    }

    /// Bare mirror location.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Disposable working tree location.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Publish root the generator writes into.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreConfig, SiteSection};

    fn config(repo: &str) -> SiteConfig {
        SiteConfig {
            core: CoreConfig {
                repo: "/var/lib/pushsite/repository".into(),
                source: "/var/lib/pushsite/source".into(),
                public: "/var/www/public".into(),
                secret: String::new(),
            },
            site: SiteSection {
                repo: repo.to_string(),
                theme: "ananke".to_string(),
                theme_url: "https://example.com/theme.git".to_string(),
                generator: crate::default_generator(),
                timeout_secs: crate::default_timeout_secs(),
            },
        }
    }

    #[test]
    fn parses_three_part_coordinate() {
        let app = Application::from_config(&config("github.com/acme/site")).unwrap();
        assert_eq!(app.service, "github.com");
        assert_eq!(app.user, "acme");
        assert_eq!(app.name, "site");
        assert_eq!(app.clone_url(), "git@github.com:acme/site.git");
        assert_eq!(app.full_name(), "acme/site");
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for repo in ["acme/site", "github.com/acme/site/extra", "github.com//site", ""] {
            assert!(Application::from_config(&config(repo)).is_err(), "{repo:?}");
        }
    }

    #[test]
    fn roots_are_absolute() {
        let app = Application::from_config(&config("github.com/acme/site")).unwrap();
        assert!(app.repo_dir().is_absolute());
        assert!(app.source_dir().is_absolute());
        assert!(app.public_dir().is_absolute());
    }
}
