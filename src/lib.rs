pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::RestCountriesClient, memory::MemoryStore, postgres::PostgresStore};
pub use config::SyncConfig;
pub use crate::core::{mapper::map_document, sync::CountrySync};
pub use domain::model::{CountryRecord, SyncSummary, Table};
pub use utils::error::{MappingError, NetworkError, Result, StoreError, SyncError};
