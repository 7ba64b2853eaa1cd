use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, Statement};
use tokio::sync::Mutex;
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

mod daily;
mod payments;
mod people;
mod reports;

pub use reports::{BalanceTotals, DailyEntrySummary, Due, PersonHistoryRow};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    /// Serializes mutating operations. Reads skip it and rely on their own
    /// transaction for a consistent snapshot.
    write_lock: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Next value of the shared creation sequence.
    ///
    /// People, daily entries and payments draw from the same sequence, so a
    /// single ordering covers registration order, undo recency and the merged
    /// per-person history. Must be called inside a write transaction while
    /// holding `write_lock`.
    async fn next_created_seq(&self, db_tx: &DatabaseTransaction) -> ResultEngine<i64> {
        let stmt = Statement::from_string(
            db_tx.get_database_backend(),
            "SELECT COALESCE(MAX(seq), 0) AS seq FROM ( \
             SELECT created_seq AS seq FROM people \
             UNION ALL SELECT created_seq FROM daily_entries \
             UNION ALL SELECT created_seq FROM payments)",
        );
        let row = db_tx.query_one(stmt).await?;
        let max: i64 = row.and_then(|r| r.try_get("", "seq").ok()).unwrap_or(0);
        Ok(max + 1)
    }
}

fn normalize_required_name(value: &str) -> ResultEngine<String> {
    let normalized = value.trim().nfc().collect::<String>();
    if normalized.is_empty() {
        return Err(EngineError::Validation(
            "person name must not be empty".to_string(),
        ));
    }
    Ok(normalized)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            write_lock: Mutex::new(()),
        })
    }
}
