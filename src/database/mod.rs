/*!
 * Database module for the persistent word store.
 *
 * This module provides SQLite-based persistence for:
 * - Words with their translations
 * - The two level topic hierarchy and word-topic links
 * - Named configuration presets stored as opaque bytes
 */

pub mod schema;
pub mod connection;
pub mod query;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use repository::Repository;
