//! Append-only SQLite storage for fetched quotes.
//!
//! Column names and the quote fields stored in them are declared once, in [`COLUMNS`].
//! Both the `CREATE TABLE` and the `INSERT` statements are generated from that list,
//! and binds are issued in the same order, so a column can never receive another
//! column's value.
//!
//! Each insert runs in its own single-row transaction, and `BEGIN`, `INSERT` and
//! `COMMIT` all run under the write budget (10 ms by default). If the budget runs out
//! the transaction is dropped uncommitted and SQLite rolls it back, so a timed-out
//! write never leaves a row behind. The database is opened in WAL mode: a commit then
//! needs no lock beyond the write lock the `INSERT` already holds, so open readers
//! cannot stall it.
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, info};
use quote_common::net::WRITE_BUDGET;
use quote_common::{Deadline, ExchangeQuote, QuoteError, Result};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, Sqlite, SqlitePool};

/// Table owned by the server.
pub const TABLE: &str = "quotes";

/// One stored column, the quote field that feeds it and the row field read back from it.
pub struct Column {
    /// Column name in [`TABLE`].
    pub name: &'static str,
    /// Accessor for the value written to this column.
    pub value: fn(&ExchangeQuote) -> &str,
    /// Accessor for the value read back from this column.
    pub stored: fn(&StoredQuoteRow) -> &str,
}

/// Data columns in declaration and bind order.
pub const COLUMNS: [Column; 9] = [
    Column {
        name: "code",
        value: |q| q.code.as_str(),
        stored: |r| r.code.as_str(),
    },
    Column {
        name: "codein",
        value: |q| q.codein.as_str(),
        stored: |r| r.codein.as_str(),
    },
    Column {
        name: "name",
        value: |q| q.name.as_str(),
        stored: |r| r.name.as_str(),
    },
    Column {
        name: "high",
        value: |q| q.high.as_str(),
        stored: |r| r.high.as_str(),
    },
    Column {
        name: "low",
        value: |q| q.low.as_str(),
        stored: |r| r.low.as_str(),
    },
    Column {
        name: "var_bid",
        value: |q| q.var_bid.as_str(),
        stored: |r| r.var_bid.as_str(),
    },
    Column {
        name: "pct_change",
        value: |q| q.pct_change.as_str(),
        stored: |r| r.pct_change.as_str(),
    },
    Column {
        name: "bid",
        value: |q| q.bid.as_str(),
        stored: |r| r.bid.as_str(),
    },
    Column {
        name: "ask",
        value: |q| q.ask.as_str(),
        stored: |r| r.ask.as_str(),
    },
];

static CREATE_TABLE_SQL: LazyLock<String> = LazyLock::new(|| {
    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|column| format!("{} TEXT NOT NULL", column.name))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
        TABLE,
        columns.join(", ")
    )
});

static INSERT_SQL: LazyLock<String> = LazyLock::new(|| {
    let names: Vec<&str> = COLUMNS.iter().map(|column| column.name).collect();
    let placeholders = vec!["?"; COLUMNS.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        TABLE,
        names.join(", "),
        placeholders.join(", ")
    )
});

/// A persisted quote.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StoredQuoteRow {
    pub id: i64,
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    pub var_bid: String,
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
}

impl StoredQuoteRow {
    /// Returns `true` if every data column holds the matching field of `quote`.
    pub fn matches(&self, quote: &ExchangeQuote) -> bool {
        COLUMNS
            .iter()
            .all(|column| (column.stored)(self) == (column.value)(quote))
    }
}

/// Handle to the quote table.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    pool: SqlitePool,
    write_budget: Duration,
}

impl QuoteStore {
    /// Open (creating if missing) the SQLite file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        info!("Database opened at {}", path.as_ref().display());
        Ok(Self::new(pool))
    }

    /// Wrap an existing pool with the default write budget.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_budget: WRITE_BUDGET,
        }
    }

    /// Override the write budget.
    pub fn with_write_budget(mut self, budget: Duration) -> Self {
        self.write_budget = budget;
        self
    }

    /// Current write budget.
    pub fn write_budget(&self) -> Duration {
        self.write_budget
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the quote table if it does not exist yet. Safe to call on every start.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(&CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("Schema ready: {}", *CREATE_TABLE_SQL);
        Ok(())
    }

    /// Append one row for `quote` and return its id.
    pub async fn insert(&self, quote: &ExchangeQuote) -> Result<i64> {
        let deadline = Deadline::start("database", self.write_budget);
        let outcome = deadline
            .run(async {
                let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
                let id = bind_columns(sqlx::query(&INSERT_SQL), quote)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_sqlx_error)?
                    .last_insert_rowid();
                tx.commit().await.map_err(map_sqlx_error)?;
                Ok::<_, QuoteError>(id)
            })
            .await;
        deadline.report();
        outcome
    }

    /// Number of stored rows.
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", TABLE))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count)
    }

    /// All stored rows, oldest first.
    pub async fn rows(&self) -> Result<Vec<StoredQuoteRow>> {
        sqlx::query_as::<_, StoredQuoteRow>(&format!("SELECT * FROM {} ORDER BY id", TABLE))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

fn bind_columns<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    quote: &'q ExchangeQuote,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for column in &COLUMNS {
        query = query.bind((column.value)(quote));
    }
    query
}

/// Classify a database failure as a storage error.
pub fn map_sqlx_error(err: sqlx::Error) -> QuoteError {
    QuoteError::Storage(err.to_string())
}
