use pushsite::runner::SystemRunner;
use pushsite::{AppState, load_config, logging, router};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:2017";
const DEFAULT_CONFIG_PATH: &str = "pushsite.toml";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let config_path =
        std::env::var("PUSHSITE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let log_dir = std::env::var("PUSHSITE_LOG_DIR").ok().map(Into::into);

    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let _log_guard = match logging::init(log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging: {}", e);
            std::process::exit(1);
        }
    };

    let runner = SystemRunner::new(Duration::from_secs(config.site.timeout_secs));
    let state = match AppState::new(config, runner) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Tracking {}", state.app.full_name());
    info!("Using config at {:?}", config_path);
    info!("Listening on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();
    axum::serve(listener, router(state)).await.unwrap();
}
