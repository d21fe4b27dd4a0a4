use clap::Parser;
use country_sync::core::ConfigProvider;
use country_sync::utils::{logger, validation::Validate};
use country_sync::{
    CliConfig, CountrySync, MemoryStore, RestCountriesClient, SyncConfig, SyncError, SyncSummary,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting country-sync");

    match synchronize(&cli).await {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => tracing::warn!("Could not serialize summary: {}", e),
                }
            } else {
                println!("✅ Country synchronization completed successfully!");
                println!("📊 {}", summary);
            }
        }
        Err(e) => {
            tracing::error!("❌ Country synchronization failed: {}", e);
            eprintln!("❌ Synchronization failed: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

async fn synchronize(cli: &CliConfig) -> Result<SyncSummary, SyncError> {
    let config = cli.resolve()?;
    config.validate()?;
    log_config(&config);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - loading into an in-memory store, database untouched");
        let fetcher = RestCountriesClient::with_headers(
            config.api_endpoint(),
            config.http_timeout(),
            config.http_headers(),
        );
        return CountrySync::new(fetcher, MemoryStore::new()).run().await;
    }

    CountrySync::from_config(&config)?.run().await
}

fn log_config(config: &SyncConfig) {
    tracing::info!("Fetching data from: {}", config.api_endpoint);
    if let Some(database) = config.redacted_database_url() {
        tracing::info!("Database: {}", database);
    }
    tracing::debug!(
        "Timeouts: http={}s transaction={}s",
        config.http_timeout_secs,
        config.transaction_timeout_secs
    );
}
