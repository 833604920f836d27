/*!
 * Reader for the exchange format.
 *
 * Malformed records are logged and skipped; a bad line never aborts the
 * rest of the document.
 */

use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;

use super::encoding::decode;
use super::{CONFIGURATION_PREFIX, ELEMENT_DIVIDER, MAIN_DIVIDER, PARTS_DIVIDER};
use crate::database::models::{Topic, Translation, Word, ROOT_TOPIC_LEVEL};
use crate::errors::CodecError;
use crate::file_utils::FileManager;

const ARTICLE_INDEX: usize = 0;
const WORD_INDEX: usize = 1;
const ADDITIONAL_INFORMATION_INDEX: usize = 2;
const TRANSLATIONS_INDEX: usize = 3;
const TOPICS_INDEX: usize = 4;
const WORD_PARTS: usize = 5;
const ENTRY_PARTS: usize = 2;

/// A header has the prefix as its first field and fewer fields than a word
/// line. An article equal to the prefix text still reads as a word.
fn is_header(line: &str) -> bool {
    let mut fields = line.split(MAIN_DIVIDER);
    fields.next() == Some(CONFIGURATION_PREFIX) && fields.count() < WORD_PARTS - 1
}

/// Stateful reader: the current section's language and root topic apply to
/// every word line until the next header
#[derive(Debug, Default)]
pub struct WordImporter {
    language: String,
    root_topic: Option<Topic>,
}

impl WordImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an exchange file
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<Word>> {
        let content = FileManager::read_to_string(&path)?;
        info!("Reading words from {:?}", path.as_ref());
        Ok(self.read_words(&content))
    }

    /// Parse an exchange document into words
    pub fn read_words(&mut self, content: &str) -> Vec<Word> {
        let mut words = Vec::new();
        let mut skipped = 0;

        for line in content.split('\n').map(|l| l.trim_end_matches('\r')) {
            if line.is_empty() {
                continue;
            }
            let result = if is_header(line) {
                self.read_header(line)
            } else {
                self.parse_word(line).map(|word| words.push(word))
            };
            if let Err(e) = result {
                warn!("Skipping record: {}", e);
                skipped += 1;
            }
        }

        debug!("Read {} words, skipped {} records", words.len(), skipped);
        words
    }

    /// Language of the current section
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Root topic of the current section
    pub fn root_topic(&self) -> Option<&Topic> {
        self.root_topic.as_ref()
    }

    fn read_header(&mut self, line: &str) -> Result<(), CodecError> {
        let parts: Vec<&str> = line.split(MAIN_DIVIDER).filter(|p| !p.is_empty()).collect();
        let Some(language) = parts.get(1) else {
            return Err(CodecError::MalformedHeader(line.to_string()));
        };
        self.language = language.to_string();
        self.root_topic = parts
            .get(2)
            .map(|name| Topic::new(decode(name), language.to_string(), ROOT_TOPIC_LEVEL));
        Ok(())
    }

    /// Parse one word line in the context of the current section
    pub fn parse_word(&self, line: &str) -> Result<Word, CodecError> {
        let parts: Vec<&str> = line.split(MAIN_DIVIDER).collect();
        if parts.len() != WORD_PARTS {
            return Err(CodecError::WrongFieldCount {
                expected: WORD_PARTS,
                found: parts.len(),
                line: line.to_string(),
            });
        }

        let mut word = Word::new(decode(parts[WORD_INDEX]), self.language.clone())
            .with_article(decode(parts[ARTICLE_INDEX]))
            .with_additional_information(decode(parts[ADDITIONAL_INFORMATION_INDEX]));
        word.translations = entries(parts[TRANSLATIONS_INDEX])
            .filter_map(|entry| skip_invalid(parse_translation(entry)))
            .collect();
        word.topics = entries(parts[TOPICS_INDEX])
            .filter_map(|entry| skip_invalid(self.parse_topic(entry)))
            .collect();
        Ok(word)
    }

    fn parse_topic(&self, entry: &str) -> Result<Topic, CodecError> {
        let [level, name] = split_entry(entry, "topic")?;
        let level: i32 = level
            .parse()
            .map_err(|_| CodecError::InvalidLevel(level.to_string()))?;
        let mut topic = Topic::new(decode(name), self.language.clone(), level);
        topic.root = self.root_topic.clone().map(Box::new);
        Ok(topic)
    }
}

fn entries(field: &str) -> impl Iterator<Item = &str> {
    field.split(PARTS_DIVIDER).filter(|e| !e.is_empty())
}

fn split_entry<'a>(entry: &'a str, kind: &'static str) -> Result<[&'a str; ENTRY_PARTS], CodecError> {
    let parts: Vec<&str> = entry.split(ELEMENT_DIVIDER).filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [key, value] => Ok([*key, *value]),
        _ => Err(CodecError::WrongPartCount {
            kind,
            part: entry.to_string(),
        }),
    }
}

fn parse_translation(entry: &str) -> Result<Translation, CodecError> {
    let [language, text] = split_entry(entry, "translation")?;
    Ok(Translation::new(decode(text), language))
}

fn skip_invalid<T>(result: Result<T, CodecError>) -> Option<T> {
    result.map_err(|e| warn!("{}", e)).ok()
}
