use crate::adapters::http::RestCountriesClient;
use crate::adapters::postgres::PostgresStore;
use crate::core::mapper;
use crate::domain::model::SyncSummary;
use crate::domain::ports::{ConfigProvider, CountryStore, HttpFetcher};
use crate::utils::error::{Result, SyncError};

/// Fetch, map and replace, in that order. Nothing reaches the store unless
/// the whole document was fetched and mapped.
pub struct CountrySync<F: HttpFetcher, S: CountryStore> {
    fetcher: F,
    store: S,
}

impl<F: HttpFetcher, S: CountryStore> CountrySync<F, S> {
    pub fn new(fetcher: F, store: S) -> Self {
        Self { fetcher, store }
    }

    pub async fn run(&self) -> Result<SyncSummary> {
        tracing::info!("Starting country synchronization");

        tracing::info!("Fetching countries...");
        let document = self.fetcher.fetch().await?;

        let records = mapper::map_document(&document)?;
        tracing::info!("Mapped {} countries", records.len());

        let summary = self.store.replace(&records).await?;
        tracing::info!(
            countries = summary.country_count,
            phone_prefixes = summary.phone_count,
            currencies = summary.currency_count,
            languages = summary.language_count,
            "Country synchronization completed"
        );

        Ok(summary)
    }
}

impl CountrySync<RestCountriesClient, PostgresStore> {
    /// Production wiring: REST Countries over HTTP into PostgreSQL.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let database_url = config
            .database_url()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| SyncError::MissingConfigError {
                field: "database_url".to_string(),
            })?;

        let fetcher = RestCountriesClient::with_headers(
            config.api_endpoint(),
            config.http_timeout(),
            config.http_headers(),
        );
        let store = PostgresStore::new(database_url, config.transaction_timeout());

        Ok(Self::new(fetcher, store))
    }
}
