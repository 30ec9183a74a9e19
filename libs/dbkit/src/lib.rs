//! Database handle for staffdir services.
//!
//! Builds a sqlx pool for the engine named by the DSN scheme and wraps it in a
//! SeaORM [`DatabaseConnection`]. Repositories take that connection as an
//! explicit constructor argument; nothing here is global.
//!
//! # Features
//! - `sqlite`, `pg`: enable the corresponding sqlx/SeaORM backends
//!
//! # Example
//! ```rust,no_run
//! # async fn demo() -> dbkit::Result<()> {
//! use dbkit::{ConnectOpts, DbHandle};
//!
//! let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//! let conn = db.sea(); // cheap clone, hand it to a repository
//! # drop(conn);
//! db.close().await;
//! # Ok(())
//! # }
//! ```

pub mod sqlite;

use std::time::Duration;

use sea_orm::DatabaseConnection;
use thiserror::Error;

#[cfg(feature = "pg")]
use sea_orm::SqlxPostgresConnector;
#[cfg(feature = "sqlite")]
use sea_orm::SqlxSqliteConnector;

pub use sqlite::absolutize_sqlite_dsn;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Invalid DSN: {0}")]
    InvalidDsn(String),

    #[error("Feature not enabled: {0}")]
    FeatureDisabled(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

/// Pool knobs; each driver applies the subset it supports.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    pub acquire_timeout: Option<Duration>,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    pub sqlite_busy_timeout: Option<Duration>,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            max_lifetime: None,
            sqlite_busy_timeout: None,
            create_sqlite_dirs: true,
        }
    }
}

fn apply_pool_opts<DB: sqlx::Database>(
    mut o: sqlx::pool::PoolOptions<DB>,
    opts: &ConnectOpts,
) -> sqlx::pool::PoolOptions<DB> {
    if let Some(n) = opts.max_conns {
        o = o.max_connections(n);
    }
    if let Some(n) = opts.min_conns {
        o = o.min_connections(n);
    }
    if let Some(t) = opts.acquire_timeout {
        o = o.acquire_timeout(t);
    }
    if let Some(t) = opts.idle_timeout {
        o = o.idle_timeout(t);
    }
    if let Some(t) = opts.max_lifetime {
        o = o.max_lifetime(t);
    }
    o
}

/// Connected database: engine, redacted DSN and the SeaORM connection.
#[derive(Debug, Clone)]
pub struct DbHandle {
    engine: DbEngine,
    dsn: String,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Detect engine by DSN scheme. The tail (credentials etc.) is not inspected.
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let s = dsn.trim_start();
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(redact_credentials_in_dsn(dsn)))
        }
    }

    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;
        let sea = match engine {
            #[cfg(feature = "sqlite")]
            DbEngine::Sqlite => connect_sqlite(dsn, &opts).await?,
            #[cfg(feature = "pg")]
            DbEngine::Postgres => connect_postgres(dsn, &opts).await?,
            #[allow(unreachable_patterns)]
            _ => return Err(DbError::FeatureDisabled("database engine not compiled in")),
        };

        tracing::debug!(engine = ?engine, dsn = %redact_credentials_in_dsn(dsn), "Database pool ready");
        Ok(Self {
            engine,
            dsn: redact_credentials_in_dsn(dsn),
            sea,
        })
    }

    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// DSN with the password masked.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// SeaORM connection (clone; cheap handle).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    pub async fn close(self) {
        if let Err(e) = self.sea.close().await {
            tracing::warn!(error = %e, "Failed to close database pool");
        }
    }
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(dsn: &str, opts: &ConnectOpts) -> Result<DatabaseConnection> {
    use sqlx::sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
    };
    use std::str::FromStr;

    let memory = sqlite::is_memory_dsn(dsn);
    if !memory && opts.create_sqlite_dirs {
        sqlite::prepare_sqlite_path(dsn)?;
    }

    let mut conn_opts = SqliteConnectOptions::from_str(dsn)?.create_if_missing(true);
    conn_opts = if memory {
        conn_opts.journal_mode(SqliteJournalMode::Memory)
    } else {
        conn_opts
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(
                opts.sqlite_busy_timeout
                    .unwrap_or(sqlite::DEFAULT_BUSY_TIMEOUT),
            )
    };

    let mut pool_opts = apply_pool_opts(SqlitePoolOptions::new(), opts);
    if memory {
        // Every connection to :memory: is a separate database; pin exactly one.
        pool_opts = pool_opts
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_opts.connect_with(conn_opts).await?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

#[cfg(feature = "pg")]
async fn connect_postgres(dsn: &str, opts: &ConnectOpts) -> Result<DatabaseConnection> {
    use sqlx::postgres::PgPoolOptions;

    let pool = apply_pool_opts(PgPoolOptions::new(), opts)
        .connect(dsn)
        .await?;
    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}

/// Mask the password component of a DSN for logging.
pub fn redact_credentials_in_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_string();
    }
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
