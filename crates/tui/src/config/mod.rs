use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend API root, resource paths are appended to it.
    pub base_url: String,
    pub state_path: String,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:4000/api".to_string(),
            state_path: "config/networth_state.json".to_string(),
            log_file: "networth_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "networth_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:4000/api).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the session/theme state file.
    #[arg(long)]
    state_path: Option<String>,
    /// Override the log file.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, settings: &mut AppConfig) {
        if let Some(base_url) = self.base_url {
            settings.base_url = base_url;
        }
        if let Some(state_path) = self.state_path {
            settings.state_path = state_path;
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = log_file;
        }
        if let Some(log_level) = self.log_level {
            settings.log_level = log_level;
        }
    }
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("NETWORTH_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    args.apply(&mut settings);
    Ok(settings)
}
