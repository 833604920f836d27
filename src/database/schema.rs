/*!
 * Database schema definitions.
 *
 * This module contains the SQL schema for the word store. The schema is
 * versioned; a database carrying any other version is dropped and
 * recreated from scratch, there are no incremental migrations.
 */

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

pub const TABLE_TOPIC: &str = "topic";
pub const TABLE_WORD: &str = "word";
pub const TABLE_TRANSLATION: &str = "translation";
pub const TABLE_WORD_TOPIC: &str = "word_topic";
pub const TABLE_CONFIGURATION_PRESET: &str = "configuration_preset";

/// Columns selected when mapping a `Word` row, in mapping order
pub const WORD_COLUMNS: [&str; 6] = ["id", "language", "word", "article", "additional_info", "knowledge"];

/// Columns selected when mapping a `Translation` row, in mapping order
pub const TRANSLATION_COLUMNS: [&str; 4] = ["id", "language", "word_id", "text"];

/// Columns selected when mapping a `Topic` row, in mapping order
pub const TOPIC_COLUMNS: [&str; 5] = ["id", "language", "level", "name", "root_id"];

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Foreign keys are a per-connection setting
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version != SCHEMA_VERSION {
        warn!(
            "Database schema v{} does not match v{}, recreating all tables",
            current_version, SCHEMA_VERSION
        );
        drop_all_tables(conn)?;
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .context("Failed to check schema_version table existence")?;

    if !table_exists {
        return Ok(0);
    }

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // A missing root is stored as NULL; the unique index folds it to 0 so
    // two root topics with the same name cannot both be inserted
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS topic (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            language TEXT NOT NULL,
            name TEXT NOT NULL,
            level INTEGER NOT NULL,
            root_id INTEGER REFERENCES topic(id)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS topic_unique1
            ON topic(language, level, IFNULL(root_id, 0), name);
        CREATE INDEX IF NOT EXISTS idx_topic_root ON topic(root_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS word (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            language TEXT NOT NULL,
            word TEXT NOT NULL,
            article TEXT NOT NULL DEFAULT '',
            additional_info TEXT NOT NULL DEFAULT '',
            knowledge REAL NOT NULL DEFAULT 0
        );

        CREATE UNIQUE INDEX IF NOT EXISTS word_unique1
            ON word(language, word, article, additional_info);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translation (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            language TEXT NOT NULL,
            text TEXT NOT NULL,
            word_id INTEGER NOT NULL REFERENCES word(id)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS translation_unique1
            ON translation(word_id, language, text);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS word_topic (
            word_id INTEGER NOT NULL REFERENCES word(id),
            topic_id INTEGER NOT NULL REFERENCES topic(id)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS word_topic_unique1
            ON word_topic(topic_id, word_id);
        CREATE INDEX IF NOT EXISTS idx_word_topic_word ON word_topic(word_id);
        "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS configuration_preset (
            name TEXT PRIMARY KEY,
            data BLOB
        );
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}

/// Drop all tables, children before parents
pub fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS word_topic;
        DROP TABLE IF EXISTS translation;
        DROP TABLE IF EXISTS word;
        DROP TABLE IF EXISTS topic;
        DROP TABLE IF EXISTS configuration_preset;
        DROP TABLE IF EXISTS schema_version;
        "#,
    )?;
    Ok(())
}
