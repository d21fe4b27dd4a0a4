pub mod mapper;
pub mod sync;

pub use crate::domain::model::{CountryRecord, RawDocument, SyncSummary, Table};
pub use crate::domain::ports::{ConfigProvider, CountryStore, HttpFetcher};
pub use crate::utils::error::Result;
