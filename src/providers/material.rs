/*!
 * Read-only word provider over teaching material files.
 *
 * The material format is a plain text file with three kinds of lines:
 *
 * - a header, `org.leo.dictionary.config.entity.ParseWords:` followed by
 *   colon separated, percent-encoded settings; it starts a new section and
 *   its root topic
 * - a topic line, prefixed by one or more topic markers; the number of
 *   markers gives the topic level
 * - a word line, `headword | translations | translations ...` with one
 *   translation column per target language
 *
 * Everything is parsed into memory once; nothing is persisted.
 */

use anyhow::Result;
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::WordProvider;
use crate::criteria::WordCriteria;
use crate::database::models::{Topic, Translation, Word, ROOT_TOPIC_LEVEL};
use crate::errors::{CodecError, StoreError};
use crate::exchange::decode;
use crate::file_utils::FileManager;

/// First field of a material header line
pub const HEADER_PREFIX: &str = "org.leo.dictionary.config.entity.ParseWords";

const HEADER_FIELDS: usize = 8;
const HEADER_FIELDS_WITH_ROOT: usize = 10;

/// Layout of a material file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Language of the headwords
    pub from_language: String,
    /// Language of each translation column, in column order
    pub to_languages: Vec<String>,
    /// Separates the columns of a word line
    pub separator: char,
    /// Separates alternative translations inside a column
    pub translation_separator: char,
    /// Separates additional information from a headword
    pub additional_info_separator: char,
    /// Marker that starts a topic line, repeated once per nesting level
    pub topic_flag: String,
    /// Appended to every topic marker repetition
    pub topic_delimiter: String,
    /// Name of the root topic every parsed topic hangs under
    pub root_name: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            from_language: "de".to_string(),
            to_languages: vec!["en".to_string(), "ru".to_string()],
            separator: '|',
            translation_separator: ';',
            additional_info_separator: ';',
            topic_flag: "\t".to_string(),
            topic_delimiter: String::new(),
            root_name: "German most used".to_string(),
        }
    }
}

impl ParseConfig {
    /// Apply the settings of a header line on top of this configuration.
    /// Root name and topic delimiter are only present in long headers.
    pub fn apply_header(&mut self, line: &str) -> Result<(), CodecError> {
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() < HEADER_FIELDS {
            return Err(CodecError::MalformedHeader(line.to_string()));
        }
        let malformed = || CodecError::MalformedHeader(line.to_string());

        let from_language = parts[1].trim();
        let to_languages: Vec<String> = parts[2]
            .split(';')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        if from_language.is_empty() || to_languages.is_empty() {
            return Err(malformed());
        }

        // parts[3] lists articles, which the word lines do not use
        self.separator = separator_char(parts[4]).ok_or_else(malformed)?;
        self.additional_info_separator = separator_char(parts[5]).ok_or_else(malformed)?;
        self.translation_separator = separator_char(parts[6]).ok_or_else(malformed)?;
        self.topic_flag = decode(parts[7]);
        if parts.len() >= HEADER_FIELDS_WITH_ROOT {
            self.topic_delimiter = decode(parts[8]);
            self.root_name = decode(parts[9]);
        }
        self.from_language = from_language.to_string();
        self.to_languages = to_languages;
        Ok(())
    }

    /// Regex matching one topic marker at the start of a line
    fn topic_marker(&self) -> Option<Regex> {
        let marker = format!("{}{}", self.topic_flag, self.topic_delimiter);
        if marker.is_empty() {
            return None;
        }
        Regex::new(&format!("^(?:{})", regex::escape(&marker))).ok()
    }
}

/// First character of a decoded separator field. Separators may be written
/// regex-escaped (`\|`), the escape is dropped.
fn separator_char(field: &str) -> Option<char> {
    let decoded = decode(field);
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some(escaped)) => Some(escaped),
        (first, _) => first,
    }
}

/// Words parsed from a material file
#[derive(Debug, Clone)]
pub struct MaterialWordProvider {
    config: ParseConfig,
    words: Vec<Word>,
    root_topic: Option<Topic>,
}

impl MaterialWordProvider {
    /// Parse material text. `config` is the layout used until the first
    /// header line overrides it.
    pub fn parse(content: &str, config: ParseConfig) -> Self {
        let mut parser = MaterialParser::new(config);
        for line in content.split('\n').map(|l| l.trim_end_matches('\r')) {
            if let Err(e) = parser.parse_line(line) {
                warn!("Skipping material line: {}", e);
            }
        }
        debug!("Parsed {} words from material", parser.words.len());

        Self {
            config: parser.config,
            words: parser.words,
            root_topic: parser.root_topic,
        }
    }

    /// Read and parse a material file
    pub fn from_file<P: AsRef<Path>>(path: P, config: ParseConfig) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        let provider = Self::parse(&content, config);
        info!("Parsed {} words from {:?}", provider.words.len(), path.as_ref());
        Ok(provider)
    }

    /// Layout in effect after the last header
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }
}

impl WordProvider for MaterialWordProvider {
    /// Topic filters are ignored: parsed topics carry no ids
    fn find_words(&self, criteria: &WordCriteria) -> Result<Vec<Word>, StoreError> {
        if criteria.has_topic_filter() {
            debug!("Material words have no topic ids, ignoring topic filter");
        }
        let words = self
            .words
            .iter()
            .filter(|w| {
                criteria
                    .language_from
                    .as_ref()
                    .is_none_or(|language| &w.language == language)
            })
            .map(|w| {
                let mut word = w.clone();
                if let Some(languages) = criteria.target_languages() {
                    word.translations.retain(|t| languages.contains(&t.language));
                }
                word
            })
            .filter(Word::has_translations)
            .collect();
        Ok(words)
    }

    fn language_from(&self) -> Result<Vec<String>, StoreError> {
        let languages: BTreeSet<&str> = self.words.iter().map(|w| w.language.as_str()).collect();
        Ok(languages.into_iter().map(String::from).collect())
    }

    fn language_to(&self, language: Option<&str>) -> Result<Vec<String>, StoreError> {
        let languages: BTreeSet<&str> = self
            .words
            .iter()
            .filter(|w| language.is_none_or(|l| w.language == l))
            .flat_map(|w| w.translations.iter().map(|t| t.language.as_str()))
            .collect();
        Ok(languages.into_iter().map(String::from).collect())
    }

    fn find_topics_with_root(
        &self,
        language: Option<&str>,
        root_id: Option<i64>,
        level: i32,
    ) -> Result<Vec<Topic>, StoreError> {
        if root_id.is_some() {
            return Ok(Vec::new());
        }
        let mut topics: Vec<Topic> = Vec::new();
        for topic in self.words.iter().flat_map(|w| &w.topics) {
            if topic.level == level
                && language.is_none_or(|l| topic.language == l)
                && !topics.contains(topic)
            {
                topics.push(topic.clone());
            }
        }
        Ok(topics)
    }

    fn find_root_topics(&self, language: Option<&str>) -> Result<Vec<Topic>, StoreError> {
        Ok(self
            .root_topic
            .iter()
            .filter(|t| language.is_none_or(|l| t.language == l))
            .cloned()
            .collect())
    }
}

/// Line by line parsing state
struct MaterialParser {
    config: ParseConfig,
    topic_marker: Option<Regex>,
    root_topic: Option<Topic>,
    topics: Vec<Topic>,
    words: Vec<Word>,
    index: HashMap<(String, String), usize>,
}

impl MaterialParser {
    fn new(config: ParseConfig) -> Self {
        let topic_marker = config.topic_marker();
        Self {
            config,
            topic_marker,
            root_topic: None,
            topics: Vec::new(),
            words: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn parse_line(&mut self, line: &str) -> Result<(), CodecError> {
        if line.trim().is_empty() {
            return Ok(());
        }
        if line.starts_with(HEADER_PREFIX) {
            return self.parse_header(line);
        }
        if let Some(topic) = self.parse_topic(line) {
            self.topics.retain(|t| t.level < topic.level);
            self.topics.push(topic);
            return Ok(());
        }
        self.parse_word(line)
    }

    fn parse_header(&mut self, line: &str) -> Result<(), CodecError> {
        self.config.apply_header(line)?;
        self.topic_marker = self.config.topic_marker();
        self.root_topic = Some(Topic::new(
            self.config.root_name.clone(),
            self.config.from_language.clone(),
            ROOT_TOPIC_LEVEL,
        ));
        self.topics.clear();
        Ok(())
    }

    /// A topic line, with its level one higher than the number of markers
    fn parse_topic(&self, line: &str) -> Option<Topic> {
        let marker = self.topic_marker.as_ref()?;
        let mut name = line;
        let mut level = ROOT_TOPIC_LEVEL;
        while let Some(found) = marker.find(name) {
            name = &name[found.end()..];
            level += 1;
        }
        if level == ROOT_TOPIC_LEVEL {
            return None;
        }

        let mut topic = Topic::new(name.trim(), self.config.from_language.clone(), level);
        topic.root = self.root_topic.clone().map(Box::new);
        Some(topic)
    }

    fn parse_word(&mut self, line: &str) -> Result<(), CodecError> {
        let columns: Vec<&str> = line
            .split(self.config.separator)
            .filter(|c| !c.is_empty())
            .collect();
        let expected = self.config.to_languages.len() + 1;
        if columns.len() != expected {
            return Err(CodecError::WrongFieldCount {
                expected,
                found: columns.len(),
                line: line.to_string(),
            });
        }

        let headword = columns[0].trim();
        let translations: Vec<Translation> = columns[1..]
            .iter()
            .zip(&self.config.to_languages)
            .flat_map(|(column, language)| {
                column
                    .split(self.config.translation_separator)
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(move |t| Translation::new(t, language.clone()))
            })
            .collect();

        let key = (self.config.from_language.clone(), headword.to_string());
        match self.index.get(&key) {
            Some(&i) => {
                let word = &mut self.words[i];
                for translation in translations {
                    if !word.translations.contains(&translation) {
                        word.translations.push(translation);
                    }
                }
                for topic in &self.topics {
                    if !word.topics.contains(topic) {
                        word.topics.push(topic.clone());
                    }
                }
            }
            None => {
                let mut word = Word::new(headword, self.config.from_language.clone());
                word.translations = translations;
                word.topics = self.topics.clone();
                self.index.insert(key, self.words.len());
                self.words.push(word);
            }
        }
        Ok(())
    }
}
