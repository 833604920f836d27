/*!
 * Word filter descriptor.
 */

use serde::{Deserialize, Serialize};

/// Filter passed into word queries.
///
/// Every field is optional; an empty criteria selects all words that have at
/// least one translation. Serialized with camelCase keys so it can be kept
/// as a configuration preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCriteria {
    /// Source language of the words
    #[serde(default)]
    pub language_from: Option<String>,
    /// Only attach translations in these languages
    #[serde(default)]
    pub language_to: Option<Vec<String>>,
    /// Words linked to any of these topic ids
    #[serde(default)]
    pub topics_or: Option<Vec<i64>>,
    /// Words linked to any topic under this root topic id.
    /// Ignored when `topics_or` is non-empty.
    #[serde(default)]
    pub root_topic: Option<i64>,
}

impl WordCriteria {
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language_from: Some(language.into()),
            ..Self::default()
        }
    }

    pub fn with_language_to(mut self, languages: Vec<String>) -> Self {
        self.language_to = Some(languages);
        self
    }

    pub fn with_topics(mut self, topic_ids: Vec<i64>) -> Self {
        self.topics_or = Some(topic_ids);
        self
    }

    pub fn with_root_topic(mut self, root_id: i64) -> Self {
        self.root_topic = Some(root_id);
        self
    }

    /// Explicit topic ids, if any were given
    pub fn explicit_topics(&self) -> Option<&[i64]> {
        self.topics_or.as_deref().filter(|ids| !ids.is_empty())
    }

    /// Whether the criteria restricts words by topic
    pub fn has_topic_filter(&self) -> bool {
        self.explicit_topics().is_some() || self.root_topic.is_some()
    }

    /// Target languages to keep, if restricted
    pub fn target_languages(&self) -> Option<&[String]> {
        self.language_to.as_deref().filter(|languages| !languages.is_empty())
    }
}
