#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TRANSACTION_TIMEOUT_SECS: u64 = 120;
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Fully resolved settings for one sync run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub api_endpoint: String,
    pub database_url: Option<String>,
    pub http_timeout_secs: u64,
    pub transaction_timeout_secs: u64,
    pub headers: HashMap<String, String>,
    /// Skip the database; the store is not required.
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            database_url: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            transaction_timeout_secs: DEFAULT_TRANSACTION_TIMEOUT_SECS,
            headers: HashMap::new(),
            dry_run: false,
        }
    }
}

impl SyncConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::default();
        config.merge_toml(TomlConfig::from_file(path)?);
        Ok(config)
    }

    /// Overlay every key set in `file` onto `self`.
    pub fn merge_toml(&mut self, file: TomlConfig) {
        if let Some(endpoint) = file.source.endpoint {
            self.api_endpoint = endpoint;
        }
        if let Some(timeout) = file.source.timeout_seconds {
            self.http_timeout_secs = timeout;
        }
        if let Some(headers) = file.source.headers {
            self.headers.extend(headers);
        }
        if let Some(url) = file.store.database_url {
            self.database_url = Some(url);
        }
        if let Some(timeout) = file.store.transaction_timeout_seconds {
            self.transaction_timeout_secs = timeout;
        }
    }

    /// Connection string with the password masked, for logging.
    pub fn redacted_database_url(&self) -> Option<String> {
        let raw = self.database_url.as_deref()?;
        match url::Url::parse(raw) {
            Ok(mut parsed) if parsed.password().is_some() => {
                let _ = parsed.set_password(Some("****"));
                Some(parsed.to_string())
            }
            Ok(_) => Some(raw.to_string()),
            // key=value form
            Err(_) => Some(
                raw.split_whitespace()
                    .map(|pair| {
                        if pair.starts_with("password=") {
                            "password=****"
                        } else {
                            pair
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }
}

impl ConfigProvider for SyncConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    fn transaction_timeout(&self) -> Duration {
        Duration::from_secs(self.transaction_timeout_secs)
    }

    fn http_headers(&self) -> HashMap<String, String> {
        self.headers.clone()
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_range("http_timeout", self.http_timeout_secs, 1, MAX_TIMEOUT_SECS)?;
        validation::validate_range(
            "transaction_timeout",
            self.transaction_timeout_secs,
            1,
            MAX_TIMEOUT_SECS,
        )?;

        if !self.dry_run {
            let url = validation::validate_required_field("database_url", &self.database_url)?;
            validation::validate_non_empty_string("database_url", url)?;
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
