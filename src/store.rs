//! Durable metric storage on a single SQLite connection.
//!
//! The store moves through `Unopened -> Open -> Closed`. Inserts are only
//! accepted while open, each one a single prepared statement that is
//! finalized before the call returns.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::metric::Metric;

const CREATE_METRICS_TABLE: &str = "CREATE TABLE IF NOT EXISTS metrics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    component TEXT NOT NULL,
    metric TEXT NOT NULL,
    value REAL NOT NULL,
    unit TEXT NOT NULL,
    timestamp INTEGER NOT NULL
);";

const REQUIRED_COLUMNS: [&str; 5] = ["component", "metric", "value", "unit", "timestamp"];

const INSERT_METRIC: &str =
    "INSERT INTO metrics (component, metric, value, unit, timestamp) VALUES (?1, ?2, ?3, ?4, ?5);";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store is already open")]
    AlreadyOpen,

    #[error("store has not been opened")]
    NotOpen,

    #[error("store has been closed")]
    Closed,

    #[error("metric field `{0}` is empty or not finite")]
    InvalidMetric(&'static str),

    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("existing metrics table is missing column `{0}`")]
    SchemaMismatch(&'static str),

    #[error("insert changed {0} rows, expected exactly one")]
    UnexpectedRowCount(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Open,
    Closed,
}

pub struct MetricStore {
    conn: Option<Connection>,
    state: StoreState,
    path: Option<PathBuf>,
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricStore {
    pub fn new() -> Self {
        MetricStore {
            conn: None,
            state: StoreState::Unopened,
            path: None,
        }
    }

    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.open(path)?;
        Ok(store)
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == StoreState::Open
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// On failure the connection is dropped before returning and the store
    /// stays unopened.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        match self.state {
            StoreState::Unopened => {}
            StoreState::Open => return Err(StoreError::AlreadyOpen),
            StoreState::Closed => return Err(StoreError::Closed),
        }

        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let conn = Connection::open(path)?;
        ensure_schema(&conn)?;

        info!(path = %path.display(), "connected to metrics database");
        self.conn = Some(conn);
        self.path = Some(path.to_path_buf());
        self.state = StoreState::Open;
        Ok(())
    }

    pub fn insert(&self, metric: &Metric) -> Result<(), StoreError> {
        let conn = self.connection()?;
        metric.validate().map_err(StoreError::InvalidMetric)?;

        let mut stmt = conn.prepare(INSERT_METRIC)?;
        let changed = stmt.execute(params![
            metric.component.as_str(),
            metric.metric.as_str(),
            metric.value,
            metric.unit.as_str(),
            metric.timestamp,
        ])?;
        if changed != 1 {
            return Err(StoreError::UnexpectedRowCount(changed));
        }

        debug!(
            component = %metric.component,
            metric = %metric.metric,
            value = metric.value,
            timestamp = metric.timestamp,
            "metric stored"
        );
        Ok(())
    }

    /// If SQLite refuses to close, the connection is handed to rusqlite's
    /// own `Drop`, which retries the close once more and ignores its result.
    pub fn close(&mut self) -> Result<(), StoreError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        self.state = StoreState::Closed;

        match conn.close() {
            Ok(()) => {
                info!("metrics database closed");
                Ok(())
            }
            Err((conn, err)) => {
                warn!(error = %err, "close failed, leaving it to rusqlite");
                drop(conn);
                Err(err.into())
            }
        }
    }

    fn connection(&self) -> Result<&Connection, StoreError> {
        match (self.state, self.conn.as_ref()) {
            (StoreState::Open, Some(conn)) => Ok(conn),
            (StoreState::Closed, _) => Err(StoreError::Closed),
            _ => Err(StoreError::NotOpen),
        }
    }
}

impl Drop for MetricStore {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(error = %err, "metrics database did not close cleanly");
        }
    }
}

fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(CREATE_METRICS_TABLE)?;

    // CREATE TABLE IF NOT EXISTS keeps whatever table is already there.
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('metrics')")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|required| !columns.iter().any(|c| c.eq_ignore_ascii_case(required)))
    {
        return Err(StoreError::SchemaMismatch(missing));
    }

    debug!("metrics table verified");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
