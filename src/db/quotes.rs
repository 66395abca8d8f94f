use log::{info, warn};
use rusqlite::{params, Connection, ErrorCode};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteDbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database did not answer within {0:?}")]
    Timeout(Duration),
    #[error("insert deadline passed before the write started")]
    DeadlinePassed,
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("refusing to store an empty bid")]
    EmptyBid,
}

impl QuoteDbError {
    pub fn is_timeout(&self) -> bool {
        match self {
            QuoteDbError::Timeout(_) | QuoteDbError::DeadlinePassed => true,
            QuoteDbError::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => {
                e.code == ErrorCode::DatabaseBusy
            }
            _ => false,
        }
    }
}

const QUOTES_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS cotacoes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dolar TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_QUOTE_SQL: &str = "INSERT INTO cotacoes (dolar) VALUES (?1)";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Write-only sink for quote records. Calls are blocking.
pub trait QuoteStore: Send + Sync + 'static {
    /// Creates the quote table if missing. Safe to call repeatedly.
    fn ensure_schema(&self) -> Result<(), QuoteDbError>;

    /// Appends one row and returns its id. Nothing is written once
    /// `deadline` has passed.
    fn insert(&self, bid: &str, deadline: Instant) -> Result<i64, QuoteDbError>;
}

/// File-backed store. Every call opens its own connection, so concurrent
/// requests only share the file and rely on SQLite locking for writes.
#[derive(Debug, Clone)]
pub struct SqliteQuoteStore {
    path: PathBuf,
}

impl SqliteQuoteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        SqliteQuoteStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn open(&self) -> Result<Connection, QuoteDbError> {
        let conn = Connection::open(&self.path)?;

        conn.busy_timeout(BUSY_TIMEOUT)?;

        Ok(conn)
    }
}

impl QuoteStore for SqliteQuoteStore {
    fn ensure_schema(&self) -> Result<(), QuoteDbError> {
        let conn = self.open()?;

        conn.execute_batch(QUOTES_TABLE_SQL)?;

        Ok(())
    }

    fn insert(&self, bid: &str, deadline: Instant) -> Result<i64, QuoteDbError> {
        if bid.is_empty() {
            return Err(QuoteDbError::EmptyBid);
        }

        let conn = self.open()?;
        let remaining = deadline.saturating_duration_since(Instant::now());

        if remaining.is_zero() {
            return Err(QuoteDbError::DeadlinePassed);
        }

        // lock waits must end with the deadline, not after BUSY_TIMEOUT
        conn.busy_timeout(remaining)?;
        conn.execute(INSERT_QUOTE_SQL, params![bid])?;

        Ok(conn.last_insert_rowid())
    }
}

/// Runs `ensure_schema` on the blocking pool.
pub async fn ensure_schema<S: QuoteStore>(store: &Arc<S>) -> Result<(), QuoteDbError> {
    let store = Arc::clone(store);

    tokio::task::spawn_blocking(move || store.ensure_schema()).await?
}

/// Inserts `bid`, giving up once `deadline` has elapsed. The blocking task
/// gets the same deadline and skips the write if it starts too late; only a
/// statement already running inside SQLite may still complete.
pub async fn insert_with_deadline<S: QuoteStore>(
    store: &Arc<S>,
    bid: &str,
    deadline: Duration,
) -> Result<i64, QuoteDbError> {
    let expires = Instant::now() + deadline;
    let store = Arc::clone(store);
    let bid = bid.to_string();
    let task = tokio::task::spawn_blocking(move || store.insert(&bid, expires));

    let res = match tokio::time::timeout(deadline, task).await {
        Ok(joined) => joined?,
        Err(_) => Err(QuoteDbError::Timeout(deadline)),
    };

    match &res {
        Ok(id) => info!("quote saved to database, row id: {}", id),
        Err(e) if e.is_timeout() => {
            warn!("timeout inserting quote into database after {:?}", deadline)
        }
        Err(_) => {}
    }

    res
}
