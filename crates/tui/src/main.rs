mod app;
mod client;
mod config;
mod error;
mod local_state;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::error::{AppError, Result};

/// Logs go to a file, the terminal belongs to the UI.
fn init_tracing(settings: &config::AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "networth_tui={level},engine={level}",
            level = settings.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;
    tracing::info!("starting against {}", config.base_url);

    let mut app = app::App::new(config)?;
    app.run().await?;
    tracing::info!("bye");
    Ok(())
}
