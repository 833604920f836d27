/*!
 * Tests for configuration loading
 */

use lexicon::app_config::{Config, LogLevel};
use lexicon::providers::ParseConfig;

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_load_withCustomValues_shouldOverrideDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "conf.json",
        r#"{
            "database_path": "/tmp/words.db",
            "store": { "page_size": 10, "import_chunk_size": 20 },
            "material": { "from_language": "fr", "to_languages": ["de"] },
            "log_level": "warn"
        }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.database_path.as_deref(), Some(std::path::Path::new("/tmp/words.db")));
    assert_eq!(config.store.page_size, 10);
    assert_eq!(config.store.import_chunk_size, 20);
    assert_eq!(config.material.from_language, "fr");
    assert_eq!(config.material.separator, ParseConfig::default().separator);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::load(&path).is_err());
}

#[test]
fn test_saveThenLoad_shouldPreserveConfig() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    let mut config = Config::default();
    config.material.root_name = "Reisen".to_string();
    config.log_level = LogLevel::Trace;

    config.save(&path).unwrap();
    let loaded = Config::load(&path).unwrap();

    assert_eq!(loaded.material, config.material);
    assert_eq!(loaded.log_level, LogLevel::Trace);
}
