/*!
 * End to end tests for the store-backed word provider
 */

use lexicon::database::models::{Topic, Translation, Word, LEAF_TOPIC_LEVEL, ROOT_TOPIC_LEVEL};
use lexicon::{DatabaseWordProvider, StoreSettings, WordCriteria, WordProvider};

use crate::common::{animal_topic, create_temp_dir, create_test_provider, german_word, sample_pets};

#[test]
fn test_findWordsWithTopics_shouldResolveRootTopics() {
    let provider = create_test_provider();
    provider.import_words(sample_pets()).unwrap();

    let words = provider
        .find_words_with_topics(&WordCriteria::for_language("de"))
        .unwrap();

    assert_eq!(words.len(), 2);
    for word in &words {
        assert_eq!(word.topics, vec![animal_topic("Pets")]);
        assert_eq!(word.topics[0].root_name(), Some("Animals"));
        assert!(word.topics[0].root_id().is_some());
    }
    assert_eq!(words[0].article, "der");
    assert_eq!(words[1].translations[0].translation, "cat");
}

#[test]
fn test_findWords_withoutTopics_shouldLeaveTopicsEmpty() {
    let provider = create_test_provider();
    provider.import_words(sample_pets()).unwrap();

    let words = provider.find_words(&WordCriteria::default()).unwrap();

    assert_eq!(words.len(), 2);
    assert!(words.iter().all(|w| w.topics.is_empty()));
}

#[test]
fn test_importWords_twice_shouldNotDuplicateRows() {
    let provider = create_test_provider();
    provider.import_words(sample_pets()).unwrap();
    provider.import_words(sample_pets()).unwrap();

    let stats = provider.stats().unwrap();

    assert_eq!(stats.word_count, 2);
    assert_eq!(stats.translation_count, 2);
    assert_eq!(stats.topic_count, 2);
    assert_eq!(stats.link_count, 2);
}

#[test]
fn test_importWords_withSameNameUnderDifferentRoots_shouldKeepBothTopics() {
    let provider = create_test_provider();
    let garden = Topic::new("Pets", "de", LEAF_TOPIC_LEVEL).with_root(Topic::new("Garden", "de", ROOT_TOPIC_LEVEL));
    provider
        .import_words(vec![
            german_word("Hund", "dog").with_topic(animal_topic("Pets")),
            german_word("Schnecke", "snail").with_topic(garden),
        ])
        .unwrap();

    let pets = provider.find_topics(Some("de"), LEAF_TOPIC_LEVEL).unwrap();

    assert_eq!(pets.len(), 2);
    let roots: Vec<_> = pets.iter().filter_map(|t| t.root_name()).collect();
    assert_eq!(roots, vec!["Animals", "Garden"]);
}

#[test]
fn test_deleteWord_shouldRemoveTranslationsAndLinks() {
    let provider = create_test_provider();
    provider.import_words(sample_pets()).unwrap();
    let hund = provider.find_words(&WordCriteria::for_language("de")).unwrap()[0].clone();

    assert!(provider.delete_word(hund.id.unwrap()).unwrap());
    assert!(!provider.delete_word(hund.id.unwrap()).unwrap());

    let stats = provider.stats().unwrap();
    assert_eq!(stats.word_count, 1);
    assert_eq!(stats.translation_count, 1);
    assert_eq!(stats.link_count, 1);
    assert_eq!(stats.topic_count, 2);
    assert!(provider.find_word(hund.id.unwrap()).unwrap().is_none());
}

#[test]
fn test_deleteForLanguage_shouldKeepOtherLanguages() {
    let provider = create_test_provider();
    provider.import_words(sample_pets()).unwrap();
    provider
        .import_words(vec![Word::new("chat", "fr")
            .with_translation(Translation::new("cat", "en"))
            .with_topic(Topic::new("Animaux", "fr", ROOT_TOPIC_LEVEL))])
        .unwrap();

    assert_eq!(provider.delete_for_language("de").unwrap(), 2);

    assert_eq!(provider.language_from().unwrap(), vec!["fr"]);
    let stats = provider.stats().unwrap();
    assert_eq!(stats.word_count, 1);
    assert_eq!(stats.topic_count, 1);
    assert_eq!(stats.link_count, 1);
}

#[test]
fn test_updateWordFully_shouldReconcileTranslationsAndTopics() {
    let provider = create_test_provider();
    provider
        .import_words(vec![german_word("Hund", "dog")
            .with_translation(Translation::new("собака", "ru"))
            .with_topic(animal_topic("Pets"))])
        .unwrap();
    let mut word = provider
        .find_words_with_topics(&WordCriteria::for_language("de"))
        .unwrap()
        .remove(0);

    word.knowledge = 0.5;
    word.translations[0].translation = "hound".to_string();
    word.translations.retain(|t| t.language != "ru");
    word.translations.push(Translation::new("chien", "fr"));
    word.topics = vec![animal_topic("Farm")];
    let report = provider.update_word_fully(&mut word).unwrap();

    assert!(report.word_updated);
    assert_eq!(report.translations_updated, 1);
    assert_eq!(report.translations_deleted, 1);
    assert_eq!(report.translations_inserted, 1);
    assert_eq!(report.topics_linked, 1);
    assert_eq!(report.topics_unlinked, 1);

    let stored = provider.find_words_with_topics(&WordCriteria::default()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], word);
    assert_eq!(stored[0].topics, vec![animal_topic("Farm")]);
    assert!(word.translations.iter().all(|t| t.id.is_some()));
}

#[test]
fn test_updateWordFully_withNewWord_shouldInsert() {
    let provider = create_test_provider();
    let mut word = german_word("Maus", "mouse").with_topic(animal_topic("Pets"));

    let report = provider.update_word_fully(&mut word).unwrap();

    assert!(report.word_inserted);
    assert!(word.id.is_some());
    assert_eq!(provider.find_word(word.id.unwrap()).unwrap().unwrap(), word);
}

#[test]
fn test_languages_shouldListSourceAndTargetLanguages() {
    let provider = create_test_provider();
    provider
        .import_words(vec![
            german_word("Hund", "dog").with_translation(Translation::new("собака", "ru")),
            Word::new("chat", "fr").with_translation(Translation::new("Katze", "de")),
        ])
        .unwrap();

    assert_eq!(provider.language_from().unwrap(), vec!["de", "fr"]);
    assert_eq!(provider.language_to(Some("de")).unwrap(), vec!["en", "ru"]);
    assert_eq!(provider.language_to(None).unwrap(), vec!["de", "en", "ru"]);
}

#[test]
fn test_configurationPresets_shouldStoreReplaceAndDelete() {
    let provider = create_test_provider();
    let criteria = WordCriteria::for_language("de").with_language_to(vec!["en".to_string()]);
    let data = serde_json::to_vec(&criteria).unwrap();

    provider.set_configuration_preset("german", &data).unwrap();
    provider.set_configuration_preset("german", &data).unwrap();
    provider.set_configuration_preset("french", b"{}").unwrap();

    assert_eq!(provider.configuration_preset_names().unwrap(), vec!["french", "german"]);
    let stored = provider.get_configuration_preset("german").unwrap().unwrap();
    let restored: WordCriteria = serde_json::from_slice(&stored).unwrap();
    assert_eq!(restored, criteria);

    assert!(provider.delete_configuration_preset("german").unwrap());
    assert!(provider.get_configuration_preset("german").unwrap().is_none());
}

#[test]
fn test_open_withFile_shouldPersistBetweenConnections() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("words.db");
    {
        let provider = DatabaseWordProvider::open(&path, StoreSettings::default()).unwrap();
        provider.import_words(sample_pets()).unwrap();
    }

    let provider = DatabaseWordProvider::open(&path, StoreSettings::default()).unwrap();

    assert_eq!(provider.find_words(&WordCriteria::default()).unwrap().len(), 2);
}
