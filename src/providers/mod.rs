/*!
 * Word providers.
 *
 * A provider is the surface the rest of the application reads words and
 * topics through:
 * - `DatabaseWordProvider`: backed by the SQLite word store, read and write
 * - `MaterialWordProvider`: parses teaching material into memory, read only
 */

use std::fmt::Debug;

use crate::criteria::WordCriteria;
use crate::database::models::{Topic, Word};
use crate::errors::StoreError;

/// Read contract shared by all word sources
///
/// Implementations can be used interchangeably by anything that only needs
/// to look words up. Every returned word has at least one translation.
pub trait WordProvider: Send + Sync + Debug {
    /// Words matching `criteria`, with translations
    fn find_words(&self, criteria: &WordCriteria) -> Result<Vec<Word>, StoreError>;

    /// Distinct source languages
    fn language_from(&self) -> Result<Vec<String>, StoreError>;

    /// Distinct translation languages, optionally only for words of `language`
    fn language_to(&self, language: Option<&str>) -> Result<Vec<String>, StoreError>;

    /// Topics at `level`, optionally of one language
    fn find_topics(&self, language: Option<&str>, level: i32) -> Result<Vec<Topic>, StoreError> {
        self.find_topics_with_root(language, None, level)
    }

    /// Topics at `level` under the root topic with id `root_id`
    fn find_topics_with_root(
        &self,
        language: Option<&str>,
        root_id: Option<i64>,
        level: i32,
    ) -> Result<Vec<Topic>, StoreError>;

    /// Root (level 1) topics
    fn find_root_topics(&self, language: Option<&str>) -> Result<Vec<Topic>, StoreError>;
}

pub mod database;
pub mod material;

pub use database::{DatabaseWordProvider, ImportSummary, ReconcileReport};
pub use material::{MaterialWordProvider, ParseConfig};
