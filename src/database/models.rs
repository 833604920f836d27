/*!
 * Word, translation and topic aggregates.
 *
 * These structures map onto the `word`, `translation` and `topic` tables.
 * Surrogate ids are `None` for transient objects (parsed from a file or
 * created by an editor) and are filled in by the store on insert.
 *
 * Equality is natural-key equality: ids never take part in it.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Level of a top-level (root) topic
pub const ROOT_TOPIC_LEVEL: i32 = 1;

/// Level of a topic attached to a root topic
pub const LEAF_TOPIC_LEVEL: i32 = 2;

/// A rendering of a word's meaning in another language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    /// Surrogate id, `None` until persisted
    pub id: Option<i64>,
    /// Translated text
    pub translation: String,
    /// Language code of the translation
    pub language: String,
}

impl Translation {
    /// Create a new, not yet persisted translation
    pub fn new(translation: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: None,
            translation: translation.into(),
            language: language.into(),
        }
    }
}

impl PartialEq for Translation {
    fn eq(&self, other: &Self) -> bool {
        self.translation == other.translation && self.language == other.language
    }
}

/// A named category of words.
///
/// Topics form a tree through `root`: a level 2 topic carries a copy of its
/// level 1 root. The copy is a snapshot, not a shared reference, so the
/// structure can never contain a cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Surrogate id, `None` until persisted
    pub id: Option<i64>,
    /// Topic name
    pub name: String,
    /// Language code the topic belongs to
    pub language: String,
    /// Depth in the hierarchy, 1 for root topics
    pub level: i32,
    /// Parent topic, if any
    pub root: Option<Box<Topic>>,
}

impl Topic {
    /// Create a new topic without a root
    pub fn new(name: impl Into<String>, language: impl Into<String>, level: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            language: language.into(),
            level,
            root: None,
        }
    }

    /// Attach a root topic
    pub fn with_root(mut self, root: Topic) -> Self {
        self.root = Some(Box::new(root));
        self
    }

    /// Name of the root topic, if any
    pub fn root_name(&self) -> Option<&str> {
        self.root.as_deref().map(|root| root.name.as_str())
    }

    /// Id of the root topic, if the topic has a persisted root
    pub fn root_id(&self) -> Option<i64> {
        self.root.as_deref().and_then(|root| root.id)
    }
}

impl PartialEq for Topic {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.language == other.language
            && self.level == other.level
            && self.root == other.root
    }
}

/// A headword in a source language with its translations and topics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// Surrogate id, `None` until persisted
    pub id: Option<i64>,
    /// The headword itself
    pub word: String,
    /// Free-text annotation (plural form, usage note, ...)
    pub additional_information: String,
    /// Grammatical article, empty when the language has none
    pub article: String,
    /// Source language code
    pub language: String,
    /// Learning progress score
    pub knowledge: f64,
    /// Translations, owned by the word
    pub translations: Vec<Translation>,
    /// Topics the word is linked to
    pub topics: Vec<Topic>,
}

impl Word {
    /// Create a new word with empty article and annotation
    pub fn new(word: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: None,
            word: word.into(),
            additional_information: String::new(),
            article: String::new(),
            language: language.into(),
            knowledge: 0.0,
            translations: Vec::new(),
            topics: Vec::new(),
        }
    }

    pub fn with_article(mut self, article: impl Into<String>) -> Self {
        self.article = article.into();
        self
    }

    pub fn with_additional_information(mut self, additional_information: impl Into<String>) -> Self {
        self.additional_information = additional_information.into();
        self
    }

    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translations.push(translation);
        self
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topics.push(topic);
        self
    }

    /// Whether the word has at least one translation.
    /// Words without translations are incomplete and never returned by queries.
    pub fn has_translations(&self) -> bool {
        !self.translations.is_empty()
    }

    /// Compare every stored scalar column, not only the natural key
    pub fn same_fields(&self, other: &Word) -> bool {
        self == other && self.knowledge == other.knowledge
    }

    /// Forget the surrogate ids of the word and its translations so the
    /// aggregate is treated as new data on insert
    pub fn clear_ids(&mut self) {
        self.id = None;
        for translation in &mut self.translations {
            translation.id = None;
        }
    }

    pub(crate) fn find_translation(&self, id: i64) -> Option<&Translation> {
        self.translations.iter().find(|t| t.id == Some(id))
    }

    pub(crate) fn has_topic_id(&self, id: i64) -> bool {
        self.topics.iter().any(|t| t.id == Some(id))
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
            && self.additional_information == other.additional_information
            && self.language == other.language
            && self.article == other.article
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let translations: Vec<&str> = self
            .translations
            .iter()
            .map(|t| t.translation.as_str())
            .collect();
        write!(f, "{} - {}", self.word, translations.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wordEquality_shouldIgnoreIdsAndTranslations() {
        let mut first = Word::new("Hund", "de").with_article("der");
        first.id = Some(4);
        let second = Word::new("Hund", "de")
            .with_article("der")
            .with_translation(Translation::new("dog", "en"));

        assert_eq!(first, second);
        assert_ne!(first, Word::new("Hund", "de"));
    }

    #[test]
    fn test_topicEquality_shouldCompareRootChain() {
        let animals = Topic::new("Animals", "de", ROOT_TOPIC_LEVEL);
        let mut persisted_root = animals.clone();
        persisted_root.id = Some(1);

        let pets = Topic::new("Pets", "de", LEAF_TOPIC_LEVEL).with_root(animals);
        let same_pets = Topic::new("Pets", "de", LEAF_TOPIC_LEVEL).with_root(persisted_root);
        let other_pets = Topic::new("Pets", "de", LEAF_TOPIC_LEVEL)
            .with_root(Topic::new("Home", "de", ROOT_TOPIC_LEVEL));

        assert_eq!(pets, same_pets);
        assert_ne!(pets, other_pets);
        assert_eq!(same_pets.root_id(), Some(1));
        assert_eq!(pets.root_name(), Some("Animals"));
    }

    #[test]
    fn test_clearIds_shouldKeepTopicIds() {
        let mut topic = Topic::new("Pets", "de", LEAF_TOPIC_LEVEL);
        topic.id = Some(9);
        let mut translation = Translation::new("dog", "en");
        translation.id = Some(3);
        let mut word = Word::new("Hund", "de")
            .with_translation(translation)
            .with_topic(topic);
        word.id = Some(1);

        word.clear_ids();

        assert_eq!(word.id, None);
        assert_eq!(word.translations[0].id, None);
        assert_eq!(word.topics[0].id, Some(9));
    }

    #[test]
    fn test_display_shouldJoinTranslations() {
        let word = Word::new("Katze", "de")
            .with_translation(Translation::new("cat", "en"))
            .with_translation(Translation::new("кошка", "ru"));

        assert_eq!(word.to_string(), "Katze - cat, кошка");
    }

    #[test]
    fn test_sameFields_shouldDetectKnowledgeChange() {
        let stored = Word::new("Hund", "de");
        let mut edited = stored.clone();
        edited.knowledge = 0.5;

        assert_eq!(stored, edited);
        assert!(!stored.same_fields(&edited));
    }
}
