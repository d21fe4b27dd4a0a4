use crate::domain::model::Table;
use std::fmt;
use thiserror::Error;

/// Failure talking to the upstream country directory.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON: {message}")]
    InvalidBody { url: String, message: String },
}

/// The fetched document does not have the shape of a country list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("expected a JSON array of countries, found {found}")]
    NotAList { found: &'static str },

    #[error("expected element {index} to be a JSON object, found {found}")]
    NotAnObject { index: usize, found: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Connect,
    Begin,
    Delete,
    Insert,
    Commit,
    Timeout,
}

impl fmt::Display for StorePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            StorePhase::Connect => "connect",
            StorePhase::Begin => "begin",
            StorePhase::Delete => "delete",
            StorePhase::Insert => "insert",
            StorePhase::Commit => "commit",
            StorePhase::Timeout => "timeout",
        };
        f.write_str(phase)
    }
}

/// A failed replace. The transaction it belonged to has been rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("store {phase} failed{}: {message}", table_suffix(.table))]
pub struct StoreError {
    pub phase: StorePhase,
    pub table: Option<Table>,
    pub message: String,
}

fn table_suffix(table: &Option<Table>) -> String {
    table
        .map(|t| format!(" on {}", t.name()))
        .unwrap_or_default()
}

impl StoreError {
    pub fn new(phase: StorePhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            table: None,
            message: message.into(),
        }
    }

    pub fn on_table(phase: StorePhase, table: Table, message: impl Into<String>) -> Self {
        Self {
            phase,
            table: Some(table),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SyncError {
    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::IoError(_)
            | SyncError::ConfigError { .. }
            | SyncError::MissingConfigError { .. }
            | SyncError::InvalidConfigValueError { .. } => 2,
            SyncError::Network(_) => 3,
            SyncError::Mapping(_) => 4,
            SyncError::Store(_) => 5,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SyncError::Network(NetworkError::Status { .. }) => {
                "Check that the endpoint URL and its field list are accepted by the directory service"
            }
            SyncError::Network(NetworkError::Timeout { .. }) => {
                "Increase --http-timeout or retry later"
            }
            SyncError::Network(_) => "Check network connectivity to the directory service",
            SyncError::Mapping(_) => {
                "The endpoint did not return a country list; verify it points at a REST Countries collection"
            }
            SyncError::Store(e) if e.phase == StorePhase::Connect => {
                "Check --database-url / DATABASE_URL and that the database is reachable"
            }
            SyncError::Store(e) if e.phase == StorePhase::Timeout => {
                "Increase --tx-timeout or check for long-running locks; if COMMIT was already sent, verify the country tables before re-running"
            }
            SyncError::Store(_) => {
                "The previous country data is unchanged; inspect the failing table and payload"
            }
            SyncError::IoError(_) => "Check that the configuration file exists and is readable",
            SyncError::ConfigError { .. }
            | SyncError::MissingConfigError { .. }
            | SyncError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
