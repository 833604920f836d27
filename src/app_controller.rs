use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::database::connection::{DatabaseConnection, DatabaseStats};
use crate::database::models::{Topic, Word};
use crate::exchange::WordImporter;
use crate::file_utils::FileManager;
use crate::providers::{DatabaseWordProvider, ImportSummary, MaterialWordProvider, ParseConfig, WordProvider};

// @module: Application controller for the administrative commands

/// Runs the administrative commands against the word store.
///
/// Store calls block, so the long running ones are moved onto tokio's
/// blocking pool.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Store-backed provider
    provider: DatabaseWordProvider,
}

impl Controller {
    /// Open the store named by the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let db = match &config.database_path {
            Some(path) => DatabaseConnection::new(path)?,
            None => DatabaseConnection::new_default()?,
        };
        let provider = DatabaseWordProvider::new(db, config.store);
        Ok(Self { config, provider })
    }

    /// Controller over an already opened provider
    pub fn with_provider(config: Config, provider: DatabaseWordProvider) -> Self {
        Self { config, provider }
    }

    pub fn provider(&self) -> &DatabaseWordProvider {
        &self.provider
    }

    /// Import one exchange file, or every exchange file below a directory
    pub async fn import_path(&self, path: &Path) -> Result<ImportSummary> {
        let mut total = ImportSummary::default();
        for source in FileManager::import_sources(path)? {
            let words = WordImporter::new().read_file(&source)?;
            if words.is_empty() {
                warn!("No words found in {:?}", source);
                continue;
            }
            let summary = self.import_words(words, &source).await?;
            total.imported += summary.imported;
            total.skipped += summary.skipped;
            total.batches += summary.batches;
        }
        info!("Imported {} words ({} skipped)", total.imported, total.skipped);
        Ok(total)
    }

    /// Parse a teaching material file and import its words
    pub async fn import_material(&self, path: &Path, parse_config: Option<ParseConfig>) -> Result<ImportSummary> {
        let parse_config = parse_config.unwrap_or_else(|| self.config.material.clone());
        let material = MaterialWordProvider::from_file(path, parse_config)?;
        let words = material.into_words();
        if words.is_empty() {
            warn!("No words found in {:?}", path);
            return Ok(ImportSummary::default());
        }
        self.import_words(words, path).await
    }

    async fn import_words(&self, words: Vec<Word>, source: &Path) -> Result<ImportSummary> {
        let progress_bar = ProgressBar::new(words.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message(source.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());

        let provider = self.provider.clone();
        let pb = progress_bar.clone();
        let summary = tokio::task::spawn_blocking(move || {
            provider.import_words_with_progress(words, |done, _| pb.set_position(done as u64))
        })
        .await
        .context("Import task failed")?
        .with_context(|| format!("Failed to import {:?}", source))?;

        progress_bar.finish_and_clear();
        info!(
            "{:?}: {} words in {} batches, {} skipped",
            source, summary.imported, summary.batches, summary.skipped
        );
        Ok(summary)
    }

    /// Export the words of a language to `path`. Returns the number of
    /// bytes written.
    pub async fn export(&self, path: &Path, language: &str, root_topic: Option<String>) -> Result<usize> {
        let provider = self.provider.clone();
        let language_owned = language.to_string();
        let document = tokio::task::spawn_blocking(move || {
            provider.export_language(&language_owned, root_topic.as_deref())
        })
        .await
        .context("Export task failed")??;

        if document.is_empty() {
            warn!("Nothing to export for language {}", language);
        }
        FileManager::write_to_file(path, &document)?;
        info!("Exported language {} to {:?}", language, path);
        Ok(document.len())
    }

    /// Delete a language with all of its words and topics
    pub async fn delete_language(&self, language: &str) -> Result<usize> {
        let provider = self.provider.clone();
        let language = language.to_string();
        let deleted = tokio::task::spawn_blocking(move || provider.delete_for_language(&language))
            .await
            .context("Delete task failed")??;
        Ok(deleted)
    }

    /// Source languages, or the translation languages of `from`
    pub fn languages(&self, from: Option<&str>) -> Result<Vec<String>> {
        let languages = match from {
            Some(language) => self.provider.language_to(Some(language))?,
            None => self.provider.language_from()?,
        };
        Ok(languages)
    }

    pub fn topics(&self, language: Option<&str>, root_id: Option<i64>, level: i32) -> Result<Vec<Topic>> {
        Ok(self.provider.find_topics_with_root(language, root_id, level)?)
    }

    pub fn stats(&self) -> Result<DatabaseStats> {
        Ok(self.provider.stats()?)
    }

    /// Path of the store file
    pub fn database_path(&self) -> PathBuf {
        self.provider.connection().path().to_path_buf()
    }
}
