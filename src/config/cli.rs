use crate::config::toml_config::{AppConfig, TomlConfig, DEFAULT_CONFIG_FILE};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "crop-health")]
#[command(about = "Diagnose plant leaf diseases with a remote classification service")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides backend.base_url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds, overrides backend.timeout_seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Upload a leaf image and print the diagnosis
    Diagnose {
        /// Image file to upload
        image: PathBuf,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the backend is reachable
    Health,
}

impl CliConfig {
    /// Reads the config file (if any), applies command-line overrides and validates.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut file_config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            file_config.backend.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            file_config.backend.timeout_seconds = Some(timeout);
        }

        file_config.resolve()
    }
}
