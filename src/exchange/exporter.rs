/*!
 * Writer for the exchange format.
 *
 * Words are written in sections, one per root topic scope. A word is part
 * of a section when one of its topics belongs to the section's root; the
 * unscoped section takes words without topics or with topics that have no
 * root. Only the topics of the section are written with the word.
 */

use anyhow::Result;
use log::info;
use std::path::Path;

use super::encoding::encode;
use super::{CONFIGURATION_PREFIX, ELEMENT_DIVIDER, LINE_SEPARATOR, MAIN_DIVIDER, PARTS_DIVIDER};
use crate::database::models::{Topic, Translation, Word};
use crate::file_utils::FileManager;

/// Which sections an export writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    /// The unscoped section followed by one section per root topic name
    All { root_topic_names: Vec<String> },
    /// A single section for one root topic
    RootTopic(String),
    /// A single section without a root topic
    Unscoped,
}

impl ExportScope {
    fn sections(&self) -> Vec<Option<&str>> {
        match self {
            ExportScope::All { root_topic_names } => std::iter::once(None)
                .chain(root_topic_names.iter().map(|name| Some(name.as_str())))
                .collect(),
            ExportScope::RootTopic(name) => vec![Some(name.as_str())],
            ExportScope::Unscoped => vec![None],
        }
    }
}

/// Render `words` of `language` as an exchange document.
/// An empty word list renders as an empty document.
pub fn export_words(words: &[Word], language: &str, scope: &ExportScope) -> String {
    let mut out = String::new();
    if words.is_empty() {
        return out;
    }

    for root in scope.sections() {
        let section = Section { root };
        section.write_header(&mut out, language);
        for word in words.iter().filter(|w| section.contains_word(w)) {
            section.write_word(&mut out, word);
        }
    }

    out
}

/// Render `words` and write the document to `path`
pub fn export_words_to_file<P: AsRef<Path>>(
    path: P,
    words: &[Word],
    language: &str,
    scope: &ExportScope,
) -> Result<usize> {
    let document = export_words(words, language, scope);
    FileManager::write_to_file(&path, &document)?;
    info!(
        "Exported {} words for language {} to {:?}",
        words.len(),
        language,
        path.as_ref()
    );
    Ok(words.len())
}

struct Section<'a> {
    root: Option<&'a str>,
}

impl Section<'_> {
    fn contains_topic(&self, topic: &Topic) -> bool {
        match self.root {
            None => topic.root.is_none(),
            Some(root) => topic.root_name() == Some(root),
        }
    }

    fn contains_word(&self, word: &Word) -> bool {
        let any_topic = word.topics.iter().any(|t| self.contains_topic(t));
        match self.root {
            None => word.topics.is_empty() || any_topic,
            Some(_) => any_topic,
        }
    }

    fn write_header(&self, out: &mut String, language: &str) {
        out.push_str(CONFIGURATION_PREFIX);
        out.push(MAIN_DIVIDER);
        out.push_str(language);
        if let Some(root) = self.root {
            out.push(MAIN_DIVIDER);
            out.push_str(&encode(root));
        }
        out.push_str(LINE_SEPARATOR);
    }

    fn write_word(&self, out: &mut String, word: &Word) {
        out.push_str(&encode(&word.article));
        out.push(MAIN_DIVIDER);
        out.push_str(&encode(&word.word));
        out.push(MAIN_DIVIDER);
        out.push_str(&encode(&word.additional_information));
        out.push(MAIN_DIVIDER);
        for translation in &word.translations {
            write_translation(out, translation);
            out.push(PARTS_DIVIDER);
        }
        out.push(MAIN_DIVIDER);
        for topic in word.topics.iter().filter(|t| self.contains_topic(t)) {
            out.push_str(&topic.level.to_string());
            out.push(ELEMENT_DIVIDER);
            out.push_str(&encode(&topic.name));
            out.push(PARTS_DIVIDER);
        }
        out.push_str(LINE_SEPARATOR);
    }
}

fn write_translation(out: &mut String, translation: &Translation) {
    out.push_str(&translation.language);
    out.push(ELEMENT_DIVIDER);
    out.push_str(&encode(&translation.translation));
}
