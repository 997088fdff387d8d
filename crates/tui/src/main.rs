mod app;
mod form;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    path::Path,
};

use gameshop_core::{
    config::{self, AppConfig},
    Shop,
};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let written = config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;

    if let Some(path) = written {
        tracing::info!(path = %path.display(), "Wrote default configuration");
    }
    tracing::info!(
        catalog = %config.catalog_path().display(),
        ledger = %config.ledger_path().display(),
        "Starting game shop"
    );
    let shop = Shop::open(&config);
    let mut app = app::ShopApp::new(shop);
    app.run().await
}

// The terminal owns stdout while the UI runs, so logs only go to the file.
fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("gameshop.log");

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
