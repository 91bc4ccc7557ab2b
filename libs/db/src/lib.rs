//! Database handle shared by the server and its modules.
//!
//! [`DbHandle`] owns one sqlx pool (SQLite or PostgreSQL) and exposes the
//! matching SeaORM connection for repositories. Connection strings are
//! normalized by [`dsn`] before the engine is detected.
//!
//! # Example
//! ```rust,no_run
//! # async fn demo() -> db::Result<()> {
//! use db::{ConnectOpts, DbHandle};
//!
//! let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//! let conn = db.sea();
//! # drop(conn);
//! db.close().await;
//! # Ok(())
//! # }
//! ```

pub mod dsn;

use std::time::Duration;

use sea_orm::DatabaseConnection;
use sqlx::pool::PoolOptions;
use thiserror::Error;

#[cfg(feature = "pg")]
use sea_orm::SqlxPostgresConnector;
#[cfg(feature = "sqlite")]
use sea_orm::SqlxSqliteConnector;
#[cfg(feature = "pg")]
use sqlx::{PgPool, Postgres};
#[cfg(feature = "sqlite")]
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous},
    Sqlite, SqlitePool,
};

pub use dsn::{absolutize_sqlite_dsn, is_memory_dsn, normalize_scheme, redact_credentials_in_dsn};

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
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
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

/// Pool options; each driver applies the subset it supports.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool. Ignored for in-memory SQLite.
    pub max_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Idle timeout before a connection is closed.
    pub idle_timeout: Option<Duration>,
    /// Ping connections before handing them out.
    pub test_before_acquire: bool,
    /// SQLite `busy_timeout` for file databases.
    pub sqlite_busy_timeout: Option<Duration>,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            test_before_acquire: true,
            sqlite_busy_timeout: Some(Duration::from_millis(5000)),
            create_sqlite_dirs: true,
        }
    }
}

/// One concrete sqlx pool.
#[derive(Clone, Debug)]
enum DbPool {
    #[cfg(feature = "pg")]
    Postgres(PgPool),
    #[cfg(feature = "sqlite")]
    Sqlite(SqlitePool),
}

/// Main handle.
#[derive(Debug)]
pub struct DbHandle {
    engine: DbEngine,
    pool: DbPool,
    dsn: String,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Detect engine by DSN scheme. Call on a normalized DSN.
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

    /// Normalize the DSN, connect and build the handle.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let dsn = normalize_scheme(dsn);
        let engine = Self::detect(&dsn)?;
        tracing::debug!(
            dsn = %redact_credentials_in_dsn(&dsn),
            engine = ?engine,
            "Opening database pool"
        );

        match engine {
            #[cfg(feature = "pg")]
            DbEngine::Postgres => {
                let pool = pool_options::<Postgres>(&opts).connect(&dsn).await?;
                let sea = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
                Ok(Self {
                    engine,
                    pool: DbPool::Postgres(pool),
                    dsn,
                    sea,
                })
            }
            #[cfg(feature = "sqlite")]
            DbEngine::Sqlite => {
                use std::str::FromStr;

                if opts.create_sqlite_dirs {
                    prepare_sqlite_path(&dsn)?;
                }

                let in_memory = is_memory_dsn(&dsn);
                let mut connect = SqliteConnectOptions::from_str(&dsn)?.create_if_missing(true);
                if !in_memory {
                    connect = connect
                        .journal_mode(SqliteJournalMode::Wal)
                        .synchronous(SqliteSynchronous::Normal);
                    if let Some(t) = opts.sqlite_busy_timeout {
                        connect = connect.busy_timeout(t);
                    }
                }

                let mut o = pool_options::<Sqlite>(&opts);
                if in_memory {
                    // Every connection would otherwise see its own empty database.
                    o = o
                        .max_connections(1)
                        .min_connections(1)
                        .idle_timeout(None::<Duration>)
                        .max_lifetime(None::<Duration>);
                }

                let pool = o.connect_with(connect).await?;
                let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
                Ok(Self {
                    engine,
                    pool: DbPool::Sqlite(pool),
                    dsn,
                    sea,
                })
            }
            #[cfg(not(feature = "pg"))]
            DbEngine::Postgres => Err(DbError::FeatureDisabled("PostgreSQL feature not enabled")),
            #[cfg(not(feature = "sqlite"))]
            DbEngine::Sqlite => Err(DbError::FeatureDisabled("SQLite feature not enabled")),
        }
    }

    /// Graceful pool close.
    pub async fn close(self) {
        match self.pool {
            #[cfg(feature = "pg")]
            DbPool::Postgres(p) => p.close().await,
            #[cfg(feature = "sqlite")]
            DbPool::Sqlite(p) => p.close().await,
        }
    }

    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// DSN actually used for the connection (normalized, may contain credentials).
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// SeaORM connection (clone; cheap handle over the same pool).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }
}

// ===================== helpers =====================

fn pool_options<DB: sqlx::Database>(opts: &ConnectOpts) -> PoolOptions<DB> {
    let mut o = PoolOptions::<DB>::new().test_before_acquire(opts.test_before_acquire);
    if let Some(n) = opts.max_conns {
        o = o.max_connections(n);
    }
    if let Some(t) = opts.acquire_timeout {
        o = o.acquire_timeout(t);
    }
    if let Some(t) = opts.idle_timeout {
        o = o.idle_timeout(t);
    }
    o
}

#[cfg(feature = "sqlite")]
fn prepare_sqlite_path(dsn: &str) -> Result<()> {
    if is_memory_dsn(dsn) {
        return Ok(());
    }

    let raw = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))
        .unwrap_or(dsn);
    let path = raw.split('?').next().unwrap_or(raw);

    if !path.starts_with("file:") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                // One-time blocking call during startup.
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}

// ===================== tests =====================
