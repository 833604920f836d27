/*!
 * # lexicon - vocabulary store and exchange
 *
 * A Rust library for keeping a personal vocabulary: words with their
 * translations, grouped into a hierarchy of topics.
 *
 * ## Features
 *
 * - SQLite word store with natural-key de-duplication
 * - Criteria based queries by language, topic set or root topic
 * - Reconciliation of edited words against their stored version
 * - Chunked, transactional bulk import
 * - Portable line-oriented export/import format
 * - Parser for teaching material files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `database`: schema, connection, query helpers and the repository
 * - `criteria`: word filter descriptor
 * - `exchange`: text export and import
 * - `providers`: word providers:
 *   - `providers::database`: store-backed facade
 *   - `providers::material`: in-memory teaching material parser
 * - `app_config`: Configuration management
 * - `app_controller`: Administrative commands over the store
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod criteria;
pub mod database;
pub mod errors;
pub mod exchange;
pub mod file_utils;
pub mod language_utils;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::{Config, StoreSettings};
pub use criteria::WordCriteria;
pub use database::models::{Topic, Translation, Word};
pub use errors::{AppError, CodecError, StoreError};
pub use language_utils::{get_language_name, validate_language_code};
pub use providers::{DatabaseWordProvider, MaterialWordProvider, WordProvider};
