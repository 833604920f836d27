/*!
 * Word provider backed by the SQLite word store.
 *
 * This is the facade the rest of the application talks to. It owns the
 * connection handle and groups repository calls into the transactions the
 * operations need: chunked imports, word reconciliation on save and
 * language deletes.
 */

use anyhow::Result;
use log::{debug, error, info, warn};
use std::path::Path;

use super::WordProvider;
use crate::app_config::StoreSettings;
use crate::criteria::WordCriteria;
use crate::database::connection::{DatabaseConnection, DatabaseStats};
use crate::database::models::{Topic, Word};
use crate::database::repository::Repository;
use crate::errors::StoreError;
use crate::exchange::{export_words, ExportScope};

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Words stored
    pub imported: usize,
    /// Words that failed to store and were left out
    pub skipped: usize,
    /// Transactions committed
    pub batches: usize,
}

/// Changes applied when a word was saved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub word_inserted: bool,
    pub word_updated: bool,
    pub translations_inserted: usize,
    pub translations_updated: usize,
    pub translations_deleted: usize,
    pub topics_linked: usize,
    pub topics_unlinked: usize,
}

impl ReconcileReport {
    /// Number of statements that changed stored data
    pub fn changes(&self) -> usize {
        usize::from(self.word_inserted)
            + usize::from(self.word_updated)
            + self.translations_inserted
            + self.translations_updated
            + self.translations_deleted
            + self.topics_linked
            + self.topics_unlinked
    }
}

/// Word provider over the persistent store
#[derive(Debug, Clone)]
pub struct DatabaseWordProvider {
    db: DatabaseConnection,
    settings: StoreSettings,
}

impl DatabaseWordProvider {
    pub fn new(db: DatabaseConnection, settings: StoreSettings) -> Self {
        Self { db, settings }
    }

    /// Open the store file at `path`
    pub fn open<P: AsRef<Path>>(path: P, settings: StoreSettings) -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new(path)?, settings))
    }

    /// In-memory store (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?, StoreSettings::default()))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn settings(&self) -> StoreSettings {
        self.settings
    }

    fn read<T>(&self, f: impl FnOnce(&Repository) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let page_size = self.settings.page_size;
        self.db.execute(|conn| f(&Repository::with_page_size(conn, page_size)))
    }

    fn write<T>(&self, f: impl FnOnce(&Repository) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let page_size = self.settings.page_size;
        self.db.transaction(|tx| f(&Repository::with_page_size(tx, page_size)))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A single word with translations and topics
    pub fn find_word(&self, id: i64) -> Result<Option<Word>, StoreError> {
        self.read(|repo| repo.find_word(id))
    }

    /// Like `find_words` but with every word's topics attached
    pub fn find_words_with_topics(&self, criteria: &WordCriteria) -> Result<Vec<Word>, StoreError> {
        self.read(|repo| repo.find_words(criteria, true))
    }

    /// All words of a language, optionally under one root topic, with topics
    pub fn words_for_language(&self, language: &str, root_id: Option<i64>) -> Result<Vec<Word>, StoreError> {
        self.read(|repo| repo.find_words_for_language(language, root_id))
    }

    // =========================================================================
    // Import
    // =========================================================================

    pub fn import_words(&self, words: Vec<Word>) -> Result<ImportSummary, StoreError> {
        self.import_words_with_progress(words, |_, _| {})
    }

    /// Import words in chunks, one transaction per chunk.
    ///
    /// Incoming ids are discarded, imported data is always matched by
    /// natural key. A word that fails to store is logged and skipped, and
    /// its savepoint is rolled back so none of its rows remain.
    /// `progress` is called with (words done, total) after every chunk.
    pub fn import_words_with_progress<F>(&self, mut words: Vec<Word>, mut progress: F) -> Result<ImportSummary, StoreError>
    where
        F: FnMut(usize, usize),
    {
        let total = words.len();
        let chunk_size = self.settings.import_chunk_size.max(1);
        let mut summary = ImportSummary::default();

        for (index, chunk) in words.chunks_mut(chunk_size).enumerate() {
            let start = index * chunk_size;
            let end = start + chunk.len();

            let (imported, skipped) = self.write(|repo| {
                let mut imported = 0;
                let mut skipped = 0;
                for word in chunk.iter_mut() {
                    word.clear_ids();
                    match repo.savepoint("import_word", |repo| repo.insert_word_fully(word)) {
                        Ok(_) => imported += 1,
                        Err(e) => {
                            warn!("Skipping word '{}': {}", word.word, e);
                            skipped += 1;
                        }
                    }
                }
                Ok((imported, skipped))
            })?;

            summary.imported += imported;
            summary.skipped += skipped;
            summary.batches += 1;
            info!("imported from {} to {}", start, end);
            progress(end, total);
        }

        Ok(summary)
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Save an edited word: reconcile it against its stored version, or
    /// insert it with everything it references when it is new.
    /// Assigned ids are written back into `word`.
    pub fn update_word_fully(&self, word: &mut Word) -> Result<ReconcileReport, StoreError> {
        let report = self.write(|repo| {
            let old = match word.id {
                Some(id) => repo.load_word(id)?,
                None => None,
            };
            match old {
                Some(old) => reconcile(repo, word, &old),
                None => {
                    word.id = None;
                    repo.insert_word_fully(word)?;
                    Ok(ReconcileReport {
                        word_inserted: true,
                        translations_inserted: word.translations.len(),
                        topics_linked: word.topics.len(),
                        ..ReconcileReport::default()
                    })
                }
            }
        })?;
        debug!("Saved word '{}': {:?}", word.word, report);
        Ok(report)
    }

    /// Update only the word row
    pub fn update_word(&self, word: &Word) -> Result<bool, StoreError> {
        self.write(|repo| repo.update_word(word))
    }

    /// Update a stored topic in place, or store it when it has no id yet.
    /// A new root is stored first.
    pub fn update_topic(&self, topic: &mut Topic) -> Result<i64, StoreError> {
        self.write(|repo| {
            let Some(id) = topic.id else {
                return repo.upsert_topic(topic);
            };
            if let Some(root) = topic.root.as_deref_mut() {
                repo.upsert_topic(root)?;
            }
            repo.update_topic(topic)?;
            Ok(id)
        })
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    pub fn delete_word(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.write(|repo| repo.delete_word(id))? > 0)
    }

    /// Delete every word and topic of a language, then compact the file
    pub fn delete_for_language(&self, language: &str) -> Result<usize, StoreError> {
        let deleted = self.write(|repo| repo.delete_for_language(language))?;
        if let Err(e) = self.db.vacuum() {
            error!("Vacuum after deleting language {} failed: {}", language, e);
        }
        info!("Deleted {} words for language {}", deleted, language);
        Ok(deleted)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Render the words of a language as an exchange document.
    ///
    /// With `root_topic` only the words under that root are written;
    /// otherwise the unscoped section and one section per root topic.
    pub fn export_language(&self, language: &str, root_topic: Option<&str>) -> Result<String, StoreError> {
        let roots = self.find_root_topics(Some(language))?;

        let (words, scope) = match root_topic {
            Some(name) => {
                let Some(root_id) = roots.iter().find(|t| t.name == name).and_then(|t| t.id) else {
                    warn!("Root topic '{}' not found for language {}", name, language);
                    return Ok(String::new());
                };
                (
                    self.words_for_language(language, Some(root_id))?,
                    ExportScope::RootTopic(name.to_string()),
                )
            }
            None if roots.is_empty() => (self.words_for_language(language, None)?, ExportScope::Unscoped),
            None => (
                self.words_for_language(language, None)?,
                ExportScope::All {
                    root_topic_names: roots.into_iter().map(|t| t.name).collect(),
                },
            ),
        };

        Ok(export_words(&words, language, &scope))
    }

    // =========================================================================
    // Configuration presets
    // =========================================================================

    pub fn set_configuration_preset(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        self.write(|repo| repo.upsert_configuration_preset(name, data))
    }

    pub fn get_configuration_preset(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.read(|repo| repo.get_configuration_preset(name))
    }

    pub fn delete_configuration_preset(&self, name: &str) -> Result<bool, StoreError> {
        self.write(|repo| repo.delete_configuration_preset(name))
    }

    pub fn configuration_preset_names(&self) -> Result<Vec<String>, StoreError> {
        self.read(|repo| repo.configuration_preset_names())
    }

    pub fn stats(&self) -> Result<DatabaseStats, StoreError> {
        self.db.stats()
    }
}

impl WordProvider for DatabaseWordProvider {
    fn find_words(&self, criteria: &WordCriteria) -> Result<Vec<Word>, StoreError> {
        self.read(|repo| repo.find_words(criteria, false))
    }

    fn language_from(&self) -> Result<Vec<String>, StoreError> {
        self.read(|repo| repo.language_from())
    }

    fn language_to(&self, language: Option<&str>) -> Result<Vec<String>, StoreError> {
        self.read(|repo| repo.language_to(language))
    }

    fn find_topics_with_root(
        &self,
        language: Option<&str>,
        root_id: Option<i64>,
        level: i32,
    ) -> Result<Vec<Topic>, StoreError> {
        self.read(|repo| repo.get_topics(language, root_id, level))
    }

    fn find_root_topics(&self, language: Option<&str>) -> Result<Vec<Topic>, StoreError> {
        self.read(|repo| repo.find_root_topics(language))
    }
}

/// Apply the difference between an edited word and its stored version.
///
/// Translations are matched by id: stored ones missing from the edit are
/// deleted, changed ones updated, new ones inserted. Topics are matched by
/// id the same way and linked or unlinked; topics without an id are stored
/// first.
pub fn reconcile(repo: &Repository, updated: &mut Word, old: &Word) -> Result<ReconcileReport, StoreError> {
    let word_id = old.id.ok_or_else(|| StoreError::missing_id("Stored word"))?;
    updated.id = Some(word_id);
    let mut report = ReconcileReport::default();

    if !updated.same_fields(old) {
        repo.update_word(updated)?;
        report.word_updated = true;
    }

    // Deletes go first so an edit may take over the text of a removed translation
    for translation in &old.translations {
        if let Some(id) = translation.id {
            if updated.find_translation(id).is_none() {
                repo.delete_translation(id)?;
                report.translations_deleted += 1;
            }
        }
    }
    for translation in &mut updated.translations {
        match translation.id.map(|id| old.find_translation(id)) {
            Some(Some(stored)) => {
                if stored != translation {
                    repo.update_translation(translation)?;
                    report.translations_updated += 1;
                }
            }
            // Unknown ids belong to some other word, store a copy
            Some(None) | None => {
                translation.id = None;
                repo.upsert_translation(translation, word_id)?;
                report.translations_inserted += 1;
            }
        }
    }

    for topic in &mut updated.topics {
        match topic.id {
            None => {
                let topic_id = repo.upsert_topic(topic)?;
                repo.link_word_topic(word_id, topic_id)?;
                report.topics_linked += 1;
            }
            Some(topic_id) if !old.has_topic_id(topic_id) => {
                repo.link_word_topic(word_id, topic_id)?;
                report.topics_linked += 1;
            }
            Some(_) => {}
        }
    }
    for topic in &old.topics {
        if let Some(topic_id) = topic.id {
            if !updated.has_topic_id(topic_id) {
                repo.unlink_word_topic(word_id, topic_id)?;
                report.topics_unlinked += 1;
            }
        }
    }

    Ok(report)
}
