use serde::{Deserialize, Serialize};
use std::fmt;

/// Untyped response body of the country directory.
pub type RawDocument = serde_json::Value;

/// One country and its child facets, normalized for the relational tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-2 code. `None` when the source omitted `cca2`.
    pub code: Option<String>,
    pub name: Option<String>,
    pub native_name: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub capital: Option<String>,
    /// Never negative.
    pub population: i64,
    pub area: f64,
    pub phone_prefixes: Vec<String>,
    pub currencies: Vec<String>,
    pub languages: Vec<String>,
}

/// The four persisted tables, keyed by `countries.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Countries,
    PhonePrefixes,
    Currencies,
    Languages,
}

impl Table {
    /// Foreign-key-safe delete order: children first.
    pub const DELETE_ORDER: [Table; 4] = [
        Table::Languages,
        Table::Currencies,
        Table::PhonePrefixes,
        Table::Countries,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Countries => "countries",
            Table::PhonePrefixes => "country_phone_prefixes",
            Table::Currencies => "country_currencies",
            Table::Languages => "country_languages",
        }
    }

    /// Value column of a child table; `None` for `countries`.
    pub fn value_column(self) -> Option<&'static str> {
        match self {
            Table::Countries => None,
            Table::PhonePrefixes => Some("phone_prefix"),
            Table::Currencies => Some("currency_code"),
            Table::Languages => Some("language_code"),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows inserted per table by one successful replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub country_count: usize,
    pub phone_count: usize,
    pub currency_count: usize,
    pub language_count: usize,
}

impl SyncSummary {
    pub fn count_for(&self, table: Table) -> usize {
        match table {
            Table::Countries => self.country_count,
            Table::PhonePrefixes => self.phone_count,
            Table::Currencies => self.currency_count,
            Table::Languages => self.language_count,
        }
    }

    /// Rows a replace of `records` is expected to insert.
    pub fn of_records(records: &[CountryRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, record| Self {
            country_count: acc.country_count + 1,
            phone_count: acc.phone_count + record.phone_prefixes.len(),
            currency_count: acc.currency_count + record.currencies.len(),
            language_count: acc.language_count + record.languages.len(),
        })
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Synchronized {} countries, {} phone prefixes, {} currencies, {} languages",
            self.country_count, self.phone_count, self.currency_count, self.language_count
        )
    }
}
