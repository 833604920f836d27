/*!
 * Tests for criteria based word queries
 */

use lexicon::database::models::{Translation, Word, LEAF_TOPIC_LEVEL, ROOT_TOPIC_LEVEL};
use lexicon::{WordCriteria, WordProvider};

use crate::common::{animal_topic, create_test_provider, german_word};

fn criteria_grid(topic_ids: &[i64], root_id: i64) -> Vec<WordCriteria> {
    let languages = [None, Some("de"), Some("fr")];
    let targets = [None, Some(vec!["en".to_string()]), Some(vec!["ru".to_string()]), Some(vec![])];
    let mut grid = Vec::new();
    for language in languages {
        for target in &targets {
            let mut criteria = WordCriteria {
                language_from: language.map(String::from),
                language_to: target.clone(),
                ..WordCriteria::default()
            };
            grid.push(criteria.clone());
            criteria.root_topic = Some(root_id);
            grid.push(criteria.clone());
            criteria.topics_or = Some(topic_ids.to_vec());
            grid.push(criteria);
        }
    }
    grid
}

#[test]
fn test_findWords_forAnyCriteria_shouldOnlyReturnTranslatedWords() {
    let provider = create_test_provider();
    provider
        .import_words(vec![
            german_word("Hund", "dog").with_topic(animal_topic("Pets")),
            Word::new("Katze", "de")
                .with_translation(Translation::new("кошка", "ru"))
                .with_topic(animal_topic("Pets")),
            Word::new("Leer", "de").with_topic(animal_topic("Pets")),
            Word::new("chien", "fr").with_translation(Translation::new("dog", "en")),
        ])
        .unwrap();
    let pets = provider.find_topics(Some("de"), LEAF_TOPIC_LEVEL).unwrap();
    let root = provider.find_root_topics(Some("de")).unwrap();
    let topic_ids: Vec<i64> = pets.iter().filter_map(|t| t.id).collect();

    for criteria in criteria_grid(&topic_ids, root[0].id.unwrap()) {
        let words = provider.find_words(&criteria).unwrap();
        assert!(
            words.iter().all(|w| w.has_translations()),
            "untranslated word returned for {:?}",
            criteria
        );
        assert!(words.iter().all(|w| w.word != "Leer"));
    }
}

#[test]
fn test_findWords_withTopicsAndRoot_shouldPreferTopics() {
    let provider = create_test_provider();
    provider
        .import_words(vec![
            german_word("Hund", "dog").with_topic(animal_topic("Pets")),
            german_word("Kuh", "cow").with_topic(animal_topic("Farm")),
        ])
        .unwrap();
    let topics = provider.find_topics(Some("de"), LEAF_TOPIC_LEVEL).unwrap();
    let farm = topics.iter().find(|t| t.name == "Farm").and_then(|t| t.id).unwrap();
    let root = provider.find_root_topics(Some("de")).unwrap()[0].id.unwrap();

    let criteria = WordCriteria::for_language("de")
        .with_topics(vec![farm])
        .with_root_topic(root);
    let words = provider.find_words(&criteria).unwrap();

    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "Kuh");

    let by_root = provider
        .find_words(&WordCriteria::for_language("de").with_root_topic(root))
        .unwrap();
    assert_eq!(by_root.len(), 2);
}

#[test]
fn test_findWords_withUnknownRoot_shouldReturnNothing() {
    let provider = create_test_provider();
    provider.import_words(vec![german_word("Hund", "dog")]).unwrap();

    let words = provider
        .find_words(&WordCriteria::for_language("de").with_root_topic(12345))
        .unwrap();

    assert!(words.is_empty());
}

#[test]
fn test_getTopics_shouldSeparateRootsFromChildren() {
    let provider = create_test_provider();
    provider
        .import_words(vec![
            german_word("Hund", "dog").with_topic(animal_topic("Pets")),
            german_word("Baum", "tree").with_topic(lexicon::Topic::new("Plants", "de", ROOT_TOPIC_LEVEL)),
        ])
        .unwrap();
    let animals = provider
        .find_root_topics(Some("de"))
        .unwrap()
        .into_iter()
        .find(|t| t.name == "Animals")
        .unwrap();

    let children = provider
        .find_topics_with_root(Some("de"), animals.id, LEAF_TOPIC_LEVEL)
        .unwrap();
    assert!(children.iter().all(|t| t.root_id() == animals.id));
    assert_eq!(children.len(), 1);

    let roots = provider.find_topics(Some("de"), ROOT_TOPIC_LEVEL).unwrap();
    assert_eq!(roots.len(), 2);
    assert!(roots.iter().all(|t| t.root.is_none()));
}
