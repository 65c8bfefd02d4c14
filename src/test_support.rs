//! Shared fixtures for unit tests

use std::path::Path;
use std::sync::Mutex;

use crate::app::Application;
use crate::error::{Error, Result};
use crate::runner::{Exec, ProcessRunner};
use crate::{CoreConfig, SiteConfig, SiteSection};

pub(crate) fn test_config() -> SiteConfig {
    SiteConfig {
        core: CoreConfig {
            repo: "/tmp/pushsite/repository".into(),
            source: "/tmp/pushsite/source".into(),
            public: "/tmp/pushsite/public".into(),
            secret: String::new(),
        },
        site: SiteSection {
            repo: "github.com/acme/site".to_string(),
            theme: "ananke".to_string(),
            theme_url: "https://example.com/theme.git".to_string(),
            generator: "hugo".to_string(),
            timeout_secs: 600,
        },
    }
}

pub(crate) fn test_app(repo: &Path, source: &Path, public: &Path) -> Application {
    let mut config = test_config();
    config.core.repo = repo.to_path_buf();
    config.core.source = source.to_path_buf();
    config.core.public = public.to_path_buf();
    Application::from_config(&config).unwrap()
}

/// Records every command instead of spawning it; optionally fails the first
/// command whose command line contains a pattern.
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<Exec>>,
    fail_matching: Option<String>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_matching: None,
        }
    }

    pub(crate) fn failing_on(pattern: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_matching: Some(pattern.to_string()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Exec> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for FakeRunner {
    async fn run(&self, exec: &Exec) -> Result<()> {
        self.calls.lock().unwrap().push(exec.clone());
        match &self.fail_matching {
            Some(pattern) if exec.display().contains(pattern) => Err(Error::Subprocess {
                program: exec.program.clone(),
                message: "exit status 1".to_string(),
            }),
            _ => Ok(()),
        }
    }
}
