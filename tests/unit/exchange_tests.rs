/*!
 * Tests for the exchange format
 */

use lexicon::database::models::{Topic, Translation, Word, LEAF_TOPIC_LEVEL};
use lexicon::exchange::{decode, encode, export_words, ExportScope, WordImporter};

use crate::common::{animal_topic, german_word, sample_pets};

#[test]
fn test_encode_shouldNeverEmitDelimiters() {
    let encoded = encode("a:b;c=d e\r\nf");
    assert!(!encoded.contains(':'));
    assert!(!encoded.contains(';'));
    assert!(!encoded.contains('='));
    assert!(!encoded.contains(' '));
    assert!(!encoded.contains('\n'));
    assert_eq!(decode(&encoded), "a:b;c=d e\r\nf");
}

#[test]
fn test_roundTrip_withReservedCharacters_shouldPreserveWords() {
    let words = vec![
        Word::new("Tür:schloss", "de")
            .with_article("das")
            .with_additional_information("pl=Türschlösser; n")
            .with_translation(Translation::new("door lock", "en"))
            .with_translation(Translation::new("дверной замок", "ru")),
        Word::new("Ein+Aus", "de").with_translation(Translation::new("on/off switch", "en")),
    ];

    let document = export_words(&words, "de", &ExportScope::Unscoped);
    let parsed = WordImporter::new().read_words(&document);

    assert_eq!(parsed, words);
    assert_eq!(parsed[0].translations, words[0].translations);
    assert_eq!(parsed[1].translations, words[1].translations);
}

#[test]
fn test_export_all_shouldSplitWordsBetweenSections() {
    let mut words = sample_pets();
    words.push(german_word("Baum", "tree"));
    let scope = ExportScope::All {
        root_topic_names: vec!["Animals".to_string(), "Plants".to_string()],
    };

    let document = export_words(&words, "de", &scope);
    let headers: Vec<&str> = document
        .split("\r\n")
        .filter(|line| line.starts_with("CONFIGURATION_PREFIX"))
        .collect();

    assert_eq!(
        headers,
        vec![
            "CONFIGURATION_PREFIX:de",
            "CONFIGURATION_PREFIX:de:Animals",
            "CONFIGURATION_PREFIX:de:Plants",
        ]
    );
    let parsed = WordImporter::new().read_words(&document);
    let names: Vec<&str> = parsed.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(names, vec!["Baum", "Hund", "Katze"]);
    assert_eq!(parsed[1].topics, vec![animal_topic("Pets")]);
}

#[test]
fn test_export_shouldOnlyWriteTopicsOfTheSection() {
    let word = german_word("Pferd", "horse")
        .with_topic(animal_topic("Farm"))
        .with_topic(Topic::new("Sport", "de", LEAF_TOPIC_LEVEL));

    let unscoped = export_words(std::slice::from_ref(&word), "de", &ExportScope::Unscoped);
    let animals = export_words(&[word], "de", &ExportScope::RootTopic("Animals".to_string()));

    assert!(unscoped.ends_with(":Pferd::en=horse;:2=Sport;\r\n"));
    assert!(animals.ends_with(":Pferd::en=horse;:2=Farm;\r\n"));
}

#[test]
fn test_import_withMalformedLines_shouldKeepGoing() {
    let document = "CONFIGURATION_PREFIX:de\r\n\
                    too:few:fields\r\n\
                    :Hund::en=dog;:\r\n\
                    ::::::\r\n\
                    :Katze::en=cat;xx;:2=Pets;abc=Farm;\r\n";

    let words = WordImporter::new().read_words(document);

    assert_eq!(words.len(), 2);
    assert_eq!(words[1].translations.len(), 1);
    assert_eq!(words[1].topics.len(), 1);
}
