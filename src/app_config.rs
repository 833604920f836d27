use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::repository::DEFAULT_PAGE_SIZE;
use crate::providers::material::ParseConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Database file, `None` for the per-user default location
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Word store batch sizes
    #[serde(default)]
    pub store: StoreSettings,

    /// Default layout of teaching material files
    #[serde(default)]
    pub material: ParseConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Batch sizes used by the word store
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    // @field: Ids bound into one IN (...) clause
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    // @field: Words imported per transaction
    #[serde(default = "default_import_chunk_size")]
    pub import_chunk_size: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            import_chunk_size: default_import_chunk_size(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_import_chunk_size() -> usize {
    500
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load the configuration from `path`, writing a default one first if
    /// the file does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).context(format!("Failed to parse config file: {:?}", path))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json).context(format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.material.from_language)?;
        for language in &self.material.to_languages {
            crate::language_utils::validate_language_code(language)?;
        }
        if self.material.to_languages.is_empty() {
            return Err(anyhow!("At least one material target language is required"));
        }
        if self.material.topic_flag.is_empty() {
            return Err(anyhow!("Material topic flag must not be empty"));
        }
        if self.material.separator == self.material.translation_separator {
            return Err(anyhow!("Material column and translation separators must differ"));
        }

        if self.store.page_size == 0 {
            return Err(anyhow!("Store page size must be greater than zero"));
        }
        if self.store.import_chunk_size == 0 {
            return Err(anyhow!("Import chunk size must be greater than zero"));
        }

        Ok(())
    }
}
