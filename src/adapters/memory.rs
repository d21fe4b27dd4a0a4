use crate::domain::model::{CountryRecord, SyncSummary, Table};
use crate::domain::ports::CountryStore;
use crate::utils::error::{StoreError, StorePhase};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Row of `countries`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub code: String,
    pub name: Option<String>,
    pub native_name: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub capital: Option<String>,
    pub population: i64,
    pub area: f64,
}

/// Row of one of the three child tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChildRow {
    pub country_code: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tables {
    pub countries: Vec<CountryRow>,
    pub phone_prefixes: Vec<ChildRow>,
    pub currencies: Vec<ChildRow>,
    pub languages: Vec<ChildRow>,
}

impl Tables {
    pub fn row_count(&self, table: Table) -> usize {
        match table {
            Table::Countries => self.countries.len(),
            Table::PhonePrefixes => self.phone_prefixes.len(),
            Table::Currencies => self.currencies.len(),
            Table::Languages => self.languages.len(),
        }
    }

    fn children_mut(&mut self, table: Table) -> Option<&mut Vec<ChildRow>> {
        match table {
            Table::Countries => None,
            Table::PhonePrefixes => Some(&mut self.phone_prefixes),
            Table::Currencies => Some(&mut self.currencies),
            Table::Languages => Some(&mut self.languages),
        }
    }

    fn clear(&mut self, table: Table) {
        if table == Table::Countries {
            self.countries.clear();
        } else if let Some(rows) = self.children_mut(table) {
            rows.clear();
        }
    }
}

/// In-process store enforcing the relational constraints of the country
/// schema: non-null unique code and child foreign key. Child values are
/// stored as given, empty strings included, as the `TEXT NOT NULL` columns do. A replace is staged on a copy and swapped in only on success, so
/// readers see either the previous or the new generation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Tables {
        self.tables.lock().await.clone()
    }
}

#[async_trait]
impl CountryStore for MemoryStore {
    async fn replace(&self, records: &[CountryRecord]) -> Result<SyncSummary, StoreError> {
        let mut committed = self.tables.lock().await;
        let mut staged = committed.clone();

        for table in Table::DELETE_ORDER {
            let deleted = staged.row_count(table);
            staged.clear(table);
            tracing::debug!("Cleared {} records from {}", deleted, table);
        }

        let mut codes = BTreeSet::new();
        for record in records {
            let code = insert_country(&mut staged, &mut codes, record)?;
            for (table, values) in [
                (Table::PhonePrefixes, &record.phone_prefixes),
                (Table::Currencies, &record.currencies),
                (Table::Languages, &record.languages),
            ] {
                for value in values {
                    insert_child(&mut staged, &codes, table, &code, value)?;
                }
            }
        }

        let summary = SyncSummary {
            country_count: staged.countries.len(),
            phone_count: staged.phone_prefixes.len(),
            currency_count: staged.currencies.len(),
            language_count: staged.languages.len(),
        };

        *committed = staged;
        Ok(summary)
    }
}

fn insert_country(
    tables: &mut Tables,
    codes: &mut BTreeSet<String>,
    record: &CountryRecord,
) -> Result<String, StoreError> {
    let Some(code) = record.code.clone() else {
        return Err(StoreError::on_table(
            StorePhase::Insert,
            Table::Countries,
            format!("null value in column \"code\" (name: {:?})", record.name),
        ));
    };

    if !codes.insert(code.clone()) {
        return Err(StoreError::on_table(
            StorePhase::Insert,
            Table::Countries,
            format!("duplicate key value violates primary key: code={code}"),
        ));
    }

    tables.countries.push(CountryRow {
        code: code.clone(),
        name: record.name.clone(),
        native_name: record.native_name.clone(),
        region: record.region.clone(),
        subregion: record.subregion.clone(),
        capital: record.capital.clone(),
        population: record.population,
        area: record.area,
    });
    Ok(code)
}

fn insert_child(
    tables: &mut Tables,
    codes: &BTreeSet<String>,
    table: Table,
    code: &str,
    value: &str,
) -> Result<(), StoreError> {
    if !codes.contains(code) {
        return Err(StoreError::on_table(
            StorePhase::Insert,
            table,
            format!("foreign key violation: country {code} does not exist"),
        ));
    }
    let Some(rows) = tables.children_mut(table) else {
        return Err(StoreError::on_table(
            StorePhase::Insert,
            table,
            "not a child table",
        ));
    };
    rows.push(ChildRow {
        country_code: code.to_string(),
        value: value.to_string(),
    });
    Ok(())
}
