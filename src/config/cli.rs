use crate::config::toml_config::TomlConfig;
use crate::config::SyncConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "country-sync")]
#[command(about = "Replace the country reference tables with a fresh REST Countries snapshot")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Country directory endpoint (defaults to REST Countries v3.1)
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub http_timeout: Option<u64>,

    /// Store transaction timeout in seconds
    #[arg(long)]
    pub tx_timeout: Option<u64>,

    /// Fetch and map, then load into an in-memory store instead of the database
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file, then flags.
    pub fn resolve(&self) -> Result<SyncConfig> {
        let mut config = SyncConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("Loading configuration from: {}", path);
            config.merge_toml(TomlConfig::from_file(path)?);
        }

        if let Some(endpoint) = &self.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(url) = &self.database_url {
            config.database_url = Some(url.clone());
        }
        if let Some(timeout) = self.http_timeout {
            config.http_timeout_secs = timeout;
        }
        if let Some(timeout) = self.tx_timeout {
            config.transaction_timeout_secs = timeout;
        }
        config.dry_run = self.dry_run;

        Ok(config)
    }
}
