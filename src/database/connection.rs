/*!
 * Database connection management.
 *
 * The word store works against a single SQLite handle that lives for the
 * whole process. This module opens it, initializes the schema, serializes
 * access to it and provides exclusive transactions.
 */

use anyhow::{Context, Result};
use log::{debug, error, info};
use parking_lot::Mutex;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::schema;
use crate::errors::StoreError;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "dictionary.db";

/// Default database directory name under user's data directory
const DEFAULT_DB_DIRNAME: &str = "lexicon";

/// Handle to the single store connection.
///
/// Cloning is cheap and every clone talks to the same connection; the
/// mutex makes sure only one logical operation runs against it at a time.
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Shared connection
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Create a new database connection at the default location
    pub fn new_default() -> Result<Self> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Create a new database connection at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");

        let conn =
            Connection::open_in_memory().context("Failed to create in-memory database")?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the default database path
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Execute a database operation with the connection.
    ///
    /// Statements run in autocommit mode; use `transaction` for work that
    /// has to be applied atomically.
    pub fn execute<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self.connection.lock();
        f(&conn)
    }

    /// Run operations inside an exclusive transaction.
    ///
    /// If the closure fails the transaction is rolled back when dropped.
    /// A failed commit is logged and surfaced as `TransactionFailed`.
    pub fn transaction<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Transaction) -> Result<T, StoreError>,
    {
        let mut conn = self.connection.lock();

        let tx = conn.transaction_with_behavior(TransactionBehavior::Exclusive)?;
        let result = f(&tx)?;
        tx.commit().map_err(|e| {
            error!("SQL Error on commit: {}", e);
            StoreError::TransactionFailed(e.to_string())
        })?;

        Ok(result)
    }

    /// Vacuum the database to reclaim space
    pub fn vacuum(&self) -> Result<(), StoreError> {
        self.execute(|conn| {
            conn.execute("VACUUM", [])?;
            Ok(())
        })
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DatabaseStats, StoreError> {
        self.execute(|conn| {
            let count = |table: &str| -> Result<i64, StoreError> {
                Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?)
            };

            let file_size = if self.db_path.to_string_lossy() != ":memory:" {
                std::fs::metadata(&self.db_path)
                    .map(|m| m.len())
                    .unwrap_or(0)
            } else {
                0
            };

            Ok(DatabaseStats {
                word_count: count(schema::TABLE_WORD)?,
                translation_count: count(schema::TABLE_TRANSLATION)?,
                topic_count: count(schema::TABLE_TOPIC)?,
                link_count: count(schema::TABLE_WORD_TOPIC)?,
                preset_count: count(schema::TABLE_CONFIGURATION_PRESET)?,
                file_size_bytes: file_size,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    /// Number of words
    pub word_count: i64,
    /// Number of translations
    pub translation_count: i64,
    /// Number of topics, roots included
    pub topic_count: i64,
    /// Number of word-topic links
    pub link_count: i64,
    /// Number of stored configuration presets
    pub preset_count: i64,
    /// Database file size in bytes
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Words: {}, Translations: {}, Topics: {}, Links: {}, Presets: {}, Size: {} KB",
            self.word_count,
            self.translation_count,
            self.topic_count,
            self.link_count,
            self.preset_count,
            self.file_size_bytes / 1024
        )
    }
}
