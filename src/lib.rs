pub mod app;
pub mod builder;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mirror;
pub mod pipeline;
pub mod runner;
pub mod signature;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{Router, routing};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::app::Application;
use crate::error::{Error, Result};
use crate::runner::ProcessRunner;

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub core: CoreConfig,
    pub site: SiteSection,
}

/// Daemon-level settings: the three filesystem roots and the webhook secret.
#[derive(Debug, Deserialize, Clone)]
pub struct CoreConfig {
    /// Bare mirror of the tracked repository.
    pub repo: PathBuf,
    /// Disposable working tree, wiped on every build.
    pub source: PathBuf,
    /// Publish root the generator writes into.
    pub public: PathBuf,
    /// Shared webhook secret; empty disables signature verification.
    #[serde(default)]
    pub secret: String,
}

/// The tracked site: repository coordinate, theme, and generator.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteSection {
    /// `"service/user/name"`, e.g. `"github.com/acme/site"`.
    pub repo: String,
    pub theme: String,
    pub theme_url: String,
    #[serde(default = "default_generator")]
    pub generator: String,
    /// Deadline for each git/generator subprocess.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

pub(crate) fn default_generator() -> String {
    "hugo".to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    600
}

/// Load and parse the configuration file
pub fn load_config(path: &str) -> Result<SiteConfig> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file '{}': {}", path, e)))?;

    let config: SiteConfig = toml::from_str(&config_str)?;

    Ok(config)
}

pub struct AppState<R> {
    /// Serializes `Pipeline::update()` across concurrent webhook deliveries.
    pub build_lock: Mutex<()>,
    pub app: Application,
    pub config: SiteConfig,
    pub runner: R,
}

impl<R: ProcessRunner> AppState<R> {
    pub fn new(config: SiteConfig, runner: R) -> Result<Self> {
        Ok(Self {
            build_lock: Mutex::new(()),
            app: Application::from_config(&config)?,
            config,
            runner,
        })
    }
}

pub type SharedState<R> = Arc<AppState<R>>;

pub fn router<R: ProcessRunner + 'static>(state: SharedState<R>) -> Router {
    Router::new()
        .route("/", routing::get(handlers::root))
        .route("/webhook", routing::post(handlers::handle_webhook::<R>))
        .with_state(state)
}
