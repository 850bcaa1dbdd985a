//! Jubilee application binary - composition root.
//!
//! Ties together all Jubilee crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Open the birthday store
//! 3. Build the wish provider (skipped when the API key is absent)
//! 4. Start the axum API server

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use jubilee_api::routes;
use jubilee_api::state::AppState;
use jubilee_core::config::JubileeConfig;
use jubilee_store::store::BirthdayStore;
use jubilee_wish::gemini::GeminiClient;
use jubilee_wish::provider::WishProvider;

mod cli;

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = JubileeConfig::load_or_default(&config_file);
    config.general.port = args.resolve_port(config.general.port);
    if let Some(data_dir) = args.resolve_data_dir() {
        config.general.data_dir = data_dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing. RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Jubilee v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Store.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }
    let store = Arc::new(BirthdayStore::open(data_dir.join("birthdays.json")));

    // Wish provider. A missing API key is not fatal; wishes fall back to
    // the canned template.
    let wish: Option<Arc<dyn WishProvider>> = match GeminiClient::from_env(&config.wish) {
        Ok(client) => {
            tracing::info!(model = %config.wish.model, "Wish provider configured");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Wish provider unavailable; using fallback wishes");
            None
        }
    };

    // API server.
    let state = AppState::new(config, store, wish);
    routes::start_server(state).await?;

    Ok(())
}
