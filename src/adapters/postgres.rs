use crate::domain::model::{CountryRecord, SyncSummary, Table};
use crate::domain::ports::CountryStore;
use crate::utils::error::{StoreError, StorePhase};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio_postgres::{Client, NoTls, Statement, Transaction};

// Numeric placeholders are cast so the server converts into whatever
// numeric column types the existing schema uses.
const INSERT_COUNTRY: &str = "INSERT INTO countries \
     (code, name, native_name, region, subregion, capital, population, area) \
     VALUES ($1, $2, $3, $4, $5, $6, $7::int8, $8::float8)";

/// Country tables in PostgreSQL. Each replace opens its own connection and
/// runs as a single transaction bounded by `transaction_timeout`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    database_url: String,
    transaction_timeout: Duration,
}

struct InsertStatements {
    country: Statement,
    phone_prefix: Statement,
    currency: Statement,
    language: Statement,
}

impl InsertStatements {
    async fn prepare(tx: &Transaction<'_>) -> Result<Self, StoreError> {
        Ok(Self {
            country: prepare(tx, Table::Countries, INSERT_COUNTRY.to_string()).await?,
            phone_prefix: prepare(tx, Table::PhonePrefixes, insert_child_sql(Table::PhonePrefixes))
                .await?,
            currency: prepare(tx, Table::Currencies, insert_child_sql(Table::Currencies)).await?,
            language: prepare(tx, Table::Languages, insert_child_sql(Table::Languages)).await?,
        })
    }
}

impl PostgresStore {
    pub fn new(database_url: impl Into<String>, transaction_timeout: Duration) -> Self {
        Self {
            database_url: database_url.into(),
            transaction_timeout,
        }
    }

    async fn connect(&self) -> Result<Client, StoreError> {
        let (client, connection) = tokio_postgres::connect(&self.database_url, NoTls)
            .await
            .map_err(|e| StoreError::new(StorePhase::Connect, describe(&e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(client)
    }

    async fn replace_in_transaction(
        &self,
        records: &[CountryRecord],
        commit_sent: &AtomicBool,
    ) -> Result<SyncSummary, StoreError> {
        let mut client = self.connect().await?;
        let tx = client
            .transaction()
            .await
            .map_err(|e| StoreError::new(StorePhase::Begin, describe(&e)))?;

        for table in Table::DELETE_ORDER {
            let deleted = tx
                .execute(format!("DELETE FROM {}", table.name()).as_str(), &[])
                .await
                .map_err(|e| StoreError::on_table(StorePhase::Delete, table, describe(&e)))?;
            tracing::info!("Cleared {} records from {}", deleted, table);
        }

        let statements = InsertStatements::prepare(&tx).await?;
        let mut summary = SyncSummary::default();

        for record in records {
            tx.execute(
                &statements.country,
                &[
                    &record.code,
                    &record.name,
                    &record.native_name,
                    &record.region,
                    &record.subregion,
                    &record.capital,
                    &record.population,
                    &record.area,
                ],
            )
            .await
            .map_err(|e| StoreError::on_table(StorePhase::Insert, Table::Countries, describe(&e)))?;
            summary.country_count += 1;

            // Only reached once the country row exists, so `code` is set.
            let code = record.code.as_deref().unwrap_or_default();
            for (statement, table, values) in [
                (&statements.phone_prefix, Table::PhonePrefixes, &record.phone_prefixes),
                (&statements.currency, Table::Currencies, &record.currencies),
                (&statements.language, Table::Languages, &record.languages),
            ] {
                insert_children(&tx, statement, table, code, values).await?;
            }
            summary.phone_count += record.phone_prefixes.len();
            summary.currency_count += record.currencies.len();
            summary.language_count += record.languages.len();
        }

        commit_sent.store(true, Ordering::SeqCst);
        tx.commit()
            .await
            .map_err(|e| StoreError::new(StorePhase::Commit, describe(&e)))?;

        Ok(summary)
    }
}

#[async_trait]
impl CountryStore for PostgresStore {
    async fn replace(&self, records: &[CountryRecord]) -> Result<SyncSummary, StoreError> {
        tracing::info!("Replacing country tables with {} records", records.len());

        // Dropping the uncommitted transaction on timeout rolls it back. Once
        // COMMIT is on the wire the outcome is no longer ours to decide.
        let commit_sent = AtomicBool::new(false);
        let replace = self.replace_in_transaction(records, &commit_sent);
        match tokio::time::timeout(self.transaction_timeout, replace).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::new(
                StorePhase::Timeout,
                timeout_message(self.transaction_timeout, commit_sent.load(Ordering::SeqCst)),
            )),
        }
    }
}

fn timeout_message(limit: Duration, commit_sent: bool) -> String {
    if commit_sent {
        format!(
            "no reply to COMMIT within {}s; the replace may have been applied, verify the country tables",
            limit.as_secs()
        )
    } else {
        format!(
            "replace did not finish within {}s and was rolled back",
            limit.as_secs()
        )
    }
}

fn insert_child_sql(table: Table) -> String {
    format!(
        "INSERT INTO {} (country_code, {}) VALUES ($1, $2)",
        table.name(),
        table.value_column().unwrap_or("value")
    )
}

async fn prepare(tx: &Transaction<'_>, table: Table, sql: String) -> Result<Statement, StoreError> {
    tx.prepare(&sql)
        .await
        .map_err(|e| StoreError::on_table(StorePhase::Insert, table, describe(&e)))
}

async fn insert_children(
    tx: &Transaction<'_>,
    statement: &Statement,
    table: Table,
    code: &str,
    values: &[String],
) -> Result<(), StoreError> {
    for value in values {
        tx.execute(statement, &[&code, value])
            .await
            .map_err(|e| StoreError::on_table(StorePhase::Insert, table, describe(&e)))?;
    }
    Ok(())
}

/// Prefer the server's message over the driver's generic "db error".
fn describe(error: &tokio_postgres::Error) -> String {
    match error.as_db_error() {
        Some(db) => match db.detail() {
            Some(detail) => format!("{} ({})", db.message(), detail),
            None => db.message().to_string(),
        },
        None => error.to_string(),
    }
}
