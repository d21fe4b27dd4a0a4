use crate::domain::model::{CountryRecord, RawDocument, SyncSummary};
use crate::utils::error::{NetworkError, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Fetches the raw country document with a single request.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn fetch(&self) -> Result<RawDocument, NetworkError>;
}

/// Transactional full replace of the four country tables.
///
/// Implementations either commit every row of `records` or leave the prior
/// dataset untouched.
#[async_trait]
pub trait CountryStore: Send + Sync {
    async fn replace(&self, records: &[CountryRecord]) -> Result<SyncSummary, StoreError>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn database_url(&self) -> Option<&str>;
    fn http_timeout(&self) -> Duration;
    fn transaction_timeout(&self) -> Duration;
    fn http_headers(&self) -> HashMap<String, String>;
}
