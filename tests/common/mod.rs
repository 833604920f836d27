/*!
 * Common test utilities for the lexicon test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

use lexicon::database::models::{Topic, Translation, Word, LEAF_TOPIC_LEVEL, ROOT_TOPIC_LEVEL};
use lexicon::DatabaseWordProvider;

static INIT: Once = Once::new();

/// Route library logging to the test output
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Fresh in-memory store
pub fn create_test_provider() -> DatabaseWordProvider {
    init_logging();
    DatabaseWordProvider::new_in_memory().expect("Failed to create in-memory provider")
}

/// Level 2 topic `name` under the root topic "Animals"
pub fn animal_topic(name: &str) -> Topic {
    Topic::new(name, "de", LEAF_TOPIC_LEVEL).with_root(Topic::new("Animals", "de", ROOT_TOPIC_LEVEL))
}

/// German word with one English translation
pub fn german_word(word: &str, translation: &str) -> Word {
    Word::new(word, "de").with_translation(Translation::new(translation, "en"))
}

/// Hund and Katze, both under Animals / Pets
pub fn sample_pets() -> Vec<Word> {
    vec![
        german_word("Hund", "dog").with_article("der").with_topic(animal_topic("Pets")),
        german_word("Katze", "cat").with_article("die").with_topic(animal_topic("Pets")),
    ]
}
