/*!
 * File round trips through the exchange format and material import
 */

use lexicon::exchange::{export_words_to_file, ExportScope, WordImporter};
use lexicon::providers::{MaterialWordProvider, ParseConfig};
use lexicon::{WordCriteria, WordProvider};

use crate::common::{create_temp_dir, create_test_file, create_test_provider, german_word, sample_pets};

#[test]
fn test_exportLanguage_thenImportIntoFreshStore_shouldKeepWordsAndTopics() {
    let dir = create_temp_dir().unwrap();
    let source = create_test_provider();
    let mut words = sample_pets();
    words.push(german_word("Ein/Aus", "on/off").with_additional_information("Schalter: 50%"));
    source.import_words(words).unwrap();

    let document = source.export_language("de", None).unwrap();
    let path = create_test_file(dir.path(), "de.txt", &document).unwrap();

    let imported = WordImporter::new().read_file(&path).unwrap();
    let target = create_test_provider();
    let summary = target.import_words(imported).unwrap();

    assert_eq!(summary.imported, 3);
    assert_eq!(summary.skipped, 0);
    let expected = source.find_words_with_topics(&WordCriteria::default()).unwrap();
    let actual = target.find_words_with_topics(&WordCriteria::default()).unwrap();
    assert_eq!(actual.len(), expected.len());
    for word in &expected {
        let copy = actual.iter().find(|w| *w == word).unwrap();
        assert_eq!(copy.translations, word.translations);
        assert_eq!(copy.topics, word.topics);
    }
    assert_eq!(target.export_language("de", None).unwrap(), document);
}

#[test]
fn test_exportLanguage_withRootTopic_shouldOnlyWriteThatSection() {
    let provider = create_test_provider();
    let mut words = sample_pets();
    words.push(german_word("Baum", "tree"));
    provider.import_words(words).unwrap();

    let document = provider.export_language("de", Some("Animals")).unwrap();

    assert!(document.starts_with("CONFIGURATION_PREFIX:de:Animals\r\n"));
    assert!(document.contains("der:Hund::en=dog;:2=Pets;\r\n"));
    assert!(!document.contains("Baum"));
    assert_eq!(provider.export_language("de", Some("Plants")).unwrap(), "");
}

#[test]
fn test_exportWordsToFile_shouldReportBytesWritten() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("nested").join("pets.txt");
    let words = sample_pets();

    let bytes = export_words_to_file(&path, &words, "de", &ExportScope::Unscoped).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(bytes, content.len());
    let mut importer = WordImporter::new();
    assert_eq!(importer.read_words(&content).len(), 2);
    assert_eq!(importer.language(), "de");
}

#[test]
fn test_materialFile_withHeader_shouldImportUnderRootTopic() {
    let dir = create_temp_dir().unwrap();
    let content = "org.leo.dictionary.config.entity.ParseWords:de:en:der;die;das:\\|:;:;:%09::Reisen\r\n\
                   \tZuhause\r\n\
                   Haus | house; home\r\n\
                   Tisch | table\r\n\
                   \tStadt\r\n\
                   Haus | building\r\n\
                   kaputt\r\n";
    let path = create_test_file(dir.path(), "material.txt", content).unwrap();

    let material = MaterialWordProvider::from_file(&path, ParseConfig::default()).unwrap();

    assert_eq!(material.config().root_name, "Reisen");
    assert_eq!(material.config().to_languages, vec!["en"]);
    let words = material.find_words(&WordCriteria::default()).unwrap();
    assert_eq!(words.len(), 2);
    let haus = &words[0];
    assert_eq!(haus.translations.len(), 3);
    assert_eq!(haus.topics.len(), 2);
    assert!(haus.topics.iter().all(|t| t.root_name() == Some("Reisen")));

    let store = create_test_provider();
    store.import_words(material.into_words()).unwrap();
    let roots = store.find_root_topics(Some("de")).unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].name, "Reisen");

    let document = store.export_language("de", Some("Reisen")).unwrap();
    assert!(document.contains("2=Zuhause;"));
    assert!(document.contains("2=Stadt;"));
}
