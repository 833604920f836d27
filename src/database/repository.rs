/*!
 * Repository layer for the word store.
 *
 * `Repository` wraps a borrowed connection (or transaction) and provides
 * every read and write the application needs: natural-key upserts of
 * words, topics and translations, the criteria based word query, the
 * hierarchical topic loader, updates and batched deletes.
 *
 * Failed statements are logged where they fail and returned as
 * `StoreError`; atomicity is the caller's business (see
 * `DatabaseConnection::transaction`).
 */

use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

use super::models::{Topic, Translation, Word, LEAF_TOPIC_LEVEL, ROOT_TOPIC_LEVEL};
use super::query::{
    aliased, delete_query, insert_query, null_or_equals, placeholders, select_query, update_query,
    QueryParams,
};
use super::schema::{
    TABLE_CONFIGURATION_PRESET, TABLE_TOPIC, TABLE_TRANSLATION, TABLE_WORD, TABLE_WORD_TOPIC,
    TOPIC_COLUMNS, TRANSLATION_COLUMNS, WORD_COLUMNS,
};
use crate::criteria::WordCriteria;
use crate::errors::StoreError;

/// Number of ids bound into a single `IN (...)` clause
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Topic root chains deeper than this are rejected as corrupt
pub const MAX_TOPIC_DEPTH: usize = 8;

type StoreResult<T> = Result<T, StoreError>;

/// Topics already loaded during one call, keyed by id
pub type TopicCache = HashMap<i64, Topic>;

/// Log a failed statement at the place it failed
fn logged<T>(result: rusqlite::Result<T>, what: &str) -> StoreResult<T> {
    result.map_err(|e| {
        error!("{} failed: {}", what, e);
        StoreError::from(e)
    })
}

/// Raw topic row before its root is resolved
struct TopicRow {
    id: i64,
    language: String,
    level: i32,
    name: String,
    root_id: Option<i64>,
}

impl TopicRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            language: row.get(1)?,
            level: row.get(2)?,
            name: row.get(3)?,
            root_id: row.get(4)?,
        })
    }
}

fn word_from_row(row: &Row) -> rusqlite::Result<Word> {
    Ok(Word {
        id: Some(row.get(0)?),
        language: row.get(1)?,
        word: row.get(2)?,
        article: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        additional_information: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        knowledge: row.get::<_, Option<f64>>(5)?.unwrap_or_default(),
        translations: Vec::new(),
        topics: Vec::new(),
    })
}

/// Store operations over one connection or transaction
pub struct Repository<'c> {
    conn: &'c Connection,
    page_size: usize,
}

impl<'c> Repository<'c> {
    /// Create a repository over a connection. A `rusqlite::Transaction`
    /// derefs to a connection, so the same code runs inside transactions.
    pub fn new(conn: &'c Connection) -> Self {
        Self::with_page_size(conn, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(conn: &'c Connection, page_size: usize) -> Self {
        Self {
            conn,
            page_size: page_size.max(1),
        }
    }

    /// Run `f` inside a named savepoint. On error everything `f` wrote is
    /// rolled back and the enclosing transaction stays usable.
    pub fn savepoint<T, F>(&self, name: &str, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Self) -> StoreResult<T>,
    {
        logged(self.conn.execute_batch(&format!("SAVEPOINT {}", name)), "Savepoint")?;
        match f(self) {
            Ok(value) => {
                logged(self.conn.execute_batch(&format!("RELEASE {}", name)), "Savepoint release")?;
                Ok(value)
            }
            Err(e) => {
                logged(
                    self.conn
                        .execute_batch(&format!("ROLLBACK TO {}; RELEASE {}", name, name)),
                    "Savepoint rollback",
                )?;
                Err(e)
            }
        }
    }

    // =========================================================================
    // Upserts
    // =========================================================================

    /// Id of the stored word with the same natural key, if any
    pub fn find_word_id(&self, word: &Word) -> StoreResult<Option<i64>> {
        let sql = select_query(
            TABLE_WORD,
            &["id"],
            Some("language = ? AND word = ? AND article = ? AND additional_info = ?"),
            false,
        );
        let id = self
            .conn
            .query_row(
                &sql,
                params![word.language, word.word, word.article, word.additional_information],
                |row| row.get(0),
            )
            .optional();
        logged(id, "Word lookup")
    }

    /// Return the id of the word with the same natural key, inserting the
    /// word first when it is not stored yet
    pub fn upsert_word(&self, word: &Word) -> StoreResult<i64> {
        if let Some(id) = self.find_word_id(word)? {
            return Ok(id);
        }
        let sql = insert_query(
            TABLE_WORD,
            &["language", "word", "article", "additional_info", "knowledge"],
        );
        logged(
            self.conn.execute(
                &sql,
                params![
                    word.language,
                    word.word,
                    word.article,
                    word.additional_information,
                    word.knowledge
                ],
            ),
            "Word insert",
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Id of the stored topic with the same natural key, if any.
    /// `root_id` must be the persisted id of the topic's root.
    pub fn find_topic_id(&self, topic: &Topic, root_id: Option<i64>) -> StoreResult<Option<i64>> {
        let where_clause = format!(
            "language = ? AND name = ? AND level = ? AND {}",
            null_or_equals("root_id", root_id.is_some())
        );
        let sql = select_query(TABLE_TOPIC, &["id"], Some(&where_clause), false);

        let mut params = QueryParams::new();
        params.push_text(&topic.language);
        params.push_text(&topic.name);
        params.push_integer(i64::from(topic.level));
        if let Some(root_id) = root_id {
            params.push_integer(root_id);
        }

        let id = self
            .conn
            .query_row(&sql, params.as_params(), |row| row.get(0))
            .optional();
        logged(id, "Topic lookup")
    }

    /// Resolve a topic to its id, inserting it (and its root chain) when
    /// needed. The ids assigned are written back into `topic`.
    pub fn upsert_topic(&self, topic: &mut Topic) -> StoreResult<i64> {
        self.upsert_topic_at_depth(topic, 0)
    }

    fn upsert_topic_at_depth(&self, topic: &mut Topic, depth: usize) -> StoreResult<i64> {
        if depth > MAX_TOPIC_DEPTH {
            return Err(StoreError::InvalidState(format!(
                "Topic '{}' has a root chain deeper than {}",
                topic.name, MAX_TOPIC_DEPTH
            )));
        }
        if let Some(id) = topic.id {
            return Ok(id);
        }

        // Roots are persisted before their children
        let root_id = match topic.root.as_deref_mut() {
            Some(root) => Some(self.upsert_topic_at_depth(root, depth + 1)?),
            None => None,
        };

        if let Some(id) = self.find_topic_id(topic, root_id)? {
            topic.id = Some(id);
            return Ok(id);
        }

        let sql = insert_query(TABLE_TOPIC, &["language", "level", "name", "root_id"]);
        logged(
            self.conn.execute(
                &sql,
                params![topic.language, topic.level, topic.name, root_id],
            ),
            "Topic insert",
        )?;
        let id = self.conn.last_insert_rowid();
        topic.id = Some(id);
        Ok(id)
    }

    /// Id of the stored translation of `word_id` with the same text and language
    pub fn find_translation_id(&self, translation: &Translation, word_id: i64) -> StoreResult<Option<i64>> {
        let sql = select_query(
            TABLE_TRANSLATION,
            &["id"],
            Some("language = ? AND word_id = ? AND text = ?"),
            false,
        );
        let id = self
            .conn
            .query_row(
                &sql,
                params![translation.language, word_id, translation.translation],
                |row| row.get(0),
            )
            .optional();
        logged(id, "Translation lookup")
    }

    /// Resolve a translation of `word_id` to its id, inserting it when
    /// needed. The id is written back into `translation`.
    pub fn upsert_translation(&self, translation: &mut Translation, word_id: i64) -> StoreResult<i64> {
        if let Some(id) = self.find_translation_id(translation, word_id)? {
            translation.id = Some(id);
            return Ok(id);
        }
        let sql = insert_query(TABLE_TRANSLATION, &["word_id", "language", "text"]);
        logged(
            self.conn.execute(
                &sql,
                params![word_id, translation.language, translation.translation],
            ),
            "Translation insert",
        )?;
        let id = self.conn.last_insert_rowid();
        translation.id = Some(id);
        Ok(id)
    }

    /// Link a word to a topic; linking an existing pair is a no-op
    pub fn link_word_topic(&self, word_id: i64, topic_id: i64) -> StoreResult<()> {
        logged(
            self.conn.execute(
                "INSERT OR IGNORE INTO word_topic (word_id, topic_id) VALUES (?1, ?2)",
                params![word_id, topic_id],
            ),
            "Word topic link",
        )?;
        Ok(())
    }

    pub fn unlink_word_topic(&self, word_id: i64, topic_id: i64) -> StoreResult<()> {
        let sql = delete_query(TABLE_WORD_TOPIC, "word_id = ? AND topic_id = ?");
        logged(
            self.conn.execute(&sql, params![word_id, topic_id]),
            "Word topic unlink",
        )?;
        Ok(())
    }

    /// Upsert a word with all of its translations and topics and link the
    /// topics to it. Assigned ids are written back into the aggregate.
    pub fn insert_word_fully(&self, word: &mut Word) -> StoreResult<i64> {
        let word_id = self.upsert_word(word)?;
        word.id = Some(word_id);

        for translation in &mut word.translations {
            self.upsert_translation(translation, word_id)?;
        }
        for topic in &mut word.topics {
            let topic_id = self.upsert_topic(topic)?;
            self.link_word_topic(word_id, topic_id)?;
        }

        Ok(word_id)
    }

    // =========================================================================
    // Word queries
    // =========================================================================

    /// Find the words matching `criteria`, each with its translations.
    ///
    /// Words without any (matching) translation are not returned. With
    /// `include_topics` every word also gets its level 2 topics with their
    /// roots resolved.
    pub fn find_words(&self, criteria: &WordCriteria, include_topics: bool) -> StoreResult<Vec<Word>> {
        let topic_ids = self.topic_ids_for_criteria(criteria)?;
        if criteria.has_topic_filter() && topic_ids.is_empty() {
            debug!("Topic filter resolved to no topics, no words match");
            return Ok(Vec::new());
        }

        let mut sql = format!(
            "SELECT DISTINCT {} FROM {} w",
            aliased("w", &WORD_COLUMNS),
            TABLE_WORD
        );
        let mut params = QueryParams::new();

        if !topic_ids.is_empty() {
            sql.push_str(&format!(
                " INNER JOIN {} wt ON w.id = wt.word_id AND wt.topic_id IN ({})",
                TABLE_WORD_TOPIC,
                placeholders(topic_ids.len())
            ));
            params.extend_integers(&topic_ids);
        }
        if let Some(language) = &criteria.language_from {
            sql.push_str(" WHERE w.language = ?");
            params.push_text(language);
        }
        sql.push_str(" ORDER BY w.id");

        let mut words = self.query_words(&sql, &params)?;
        self.attach_translations(&mut words, criteria.target_languages())?;
        words.retain(Word::has_translations);

        if include_topics && !words.is_empty() {
            let mut cache = self.root_topic_cache(criteria.language_from.as_deref())?;
            for word in &mut words {
                if let Some(word_id) = word.id {
                    word.topics =
                        self.topics_for_word(word_id, &word.language, LEAF_TOPIC_LEVEL, &mut cache)?;
                }
            }
        }

        Ok(words)
    }

    /// All words of `language`, optionally only those under a root topic,
    /// with topics included. Used for export.
    pub fn find_words_for_language(&self, language: &str, root_id: Option<i64>) -> StoreResult<Vec<Word>> {
        let mut criteria = WordCriteria::for_language(language);
        criteria.root_topic = root_id;
        self.find_words(&criteria, true)
    }

    /// A single word with translations and topics, `None` if it does not
    /// exist or has no translations
    pub fn find_word(&self, id: i64) -> StoreResult<Option<Word>> {
        Ok(self.load_word(id)?.filter(Word::has_translations))
    }

    /// A single stored word with whatever translations and topics it has
    pub fn load_word(&self, id: i64) -> StoreResult<Option<Word>> {
        let sql = select_query(TABLE_WORD, &WORD_COLUMNS, Some("id = ?"), false);
        let mut params = QueryParams::new();
        params.push_integer(id);

        let mut words = self.query_words(&sql, &params)?;
        self.attach_translations(&mut words, None)?;

        let Some(mut word) = words.pop() else {
            return Ok(None);
        };
        let mut cache = self.root_topic_cache(Some(&word.language))?;
        word.topics = self.topics_for_word(id, &word.language, LEAF_TOPIC_LEVEL, &mut cache)?;
        Ok(Some(word))
    }

    fn query_words(&self, sql: &str, params: &QueryParams) -> StoreResult<Vec<Word>> {
        let mut stmt = logged(self.conn.prepare(sql), "Word query")?;
        let rows = logged(stmt.query_map(params.as_params(), word_from_row), "Word query")?;
        logged(rows.collect(), "Word row")
    }

    /// Fetch translations for `words` page by page and attach them by word id
    fn attach_translations(&self, words: &mut [Word], languages: Option<&[String]>) -> StoreResult<()> {
        let index: HashMap<i64, usize> = words
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.id.map(|id| (id, i)))
            .collect();
        let word_ids: Vec<i64> = words.iter().filter_map(|w| w.id).collect();

        for page in word_ids.chunks(self.page_size) {
            let mut where_clause = format!("word_id IN ({})", placeholders(page.len()));
            let mut params = QueryParams::new();
            params.extend_integers(page);
            if let Some(languages) = languages {
                where_clause.push_str(&format!(" AND language IN ({})", placeholders(languages.len())));
                params.extend_texts(languages);
            }
            let sql = format!(
                "{} ORDER BY id",
                select_query(TABLE_TRANSLATION, &TRANSLATION_COLUMNS, Some(&where_clause), false)
            );

            let mut stmt = logged(self.conn.prepare(&sql), "Translation query")?;
            let rows = logged(
                stmt.query_map(params.as_params(), |row| {
                    let word_id: i64 = row.get(2)?;
                    let translation = Translation {
                        id: Some(row.get(0)?),
                        language: row.get(1)?,
                        translation: row.get(3)?,
                    };
                    Ok((word_id, translation))
                }),
                "Translation query",
            )?;

            for row in rows {
                let (word_id, translation) = logged(row, "Translation row")?;
                if let Some(&i) = index.get(&word_id) {
                    words[i].translations.push(translation);
                }
            }
        }

        Ok(())
    }

    // =========================================================================
    // Topic queries
    // =========================================================================

    /// Topic ids a criteria filters by: the explicit list when given,
    /// otherwise every topic under the criteria's root topic
    pub fn topic_ids_for_criteria(&self, criteria: &WordCriteria) -> StoreResult<Vec<i64>> {
        if let Some(ids) = criteria.explicit_topics() {
            return Ok(ids.to_vec());
        }
        let Some(root_id) = criteria.root_topic else {
            return Ok(Vec::new());
        };

        let mut where_clause = String::from("root_id = ?");
        let mut params = QueryParams::new();
        params.push_integer(root_id);
        if let Some(language) = &criteria.language_from {
            where_clause.push_str(" AND language = ?");
            params.push_text(language);
        }
        let sql = select_query(TABLE_TOPIC, &["id"], Some(&where_clause), false);

        let mut stmt = logged(self.conn.prepare(&sql), "Topic id query")?;
        let rows = logged(stmt.query_map(params.as_params(), |row| row.get(0)), "Topic id query")?;
        logged(rows.collect(), "Topic id row")
    }

    /// Root (level 1) topics, optionally of one language
    pub fn find_root_topics(&self, language: Option<&str>) -> StoreResult<Vec<Topic>> {
        self.get_topics(language, None, ROOT_TOPIC_LEVEL)
    }

    /// Topics at `level`, optionally of one language and under one root.
    ///
    /// Without `root_id` no root predicate is applied at all, so a level 1
    /// listing returns every topic without a root.
    pub fn get_topics(&self, language: Option<&str>, root_id: Option<i64>, level: i32) -> StoreResult<Vec<Topic>> {
        let mut cache = if root_id.is_none() && level > ROOT_TOPIC_LEVEL {
            self.root_topic_cache(language)?
        } else {
            TopicCache::new()
        };

        let mut where_clause = String::from("level = ?");
        let mut params = QueryParams::new();
        params.push_integer(i64::from(level));
        if let Some(language) = language {
            where_clause.push_str(" AND language = ?");
            params.push_text(language);
        }
        if let Some(root_id) = root_id {
            where_clause.push_str(" AND root_id = ?");
            params.push_integer(root_id);
        }
        let sql = format!(
            "{} ORDER BY id",
            select_query(TABLE_TOPIC, &TOPIC_COLUMNS, Some(&where_clause), false)
        );

        let rows = self.query_topic_rows(&sql, &params)?;
        rows.into_iter()
            .map(|row| self.resolve_topic(row, &mut cache, 0))
            .collect()
    }

    /// Topics of `level` and `language` linked to a word, sharing `cache`
    /// across words so each root is loaded once per call
    pub fn topics_for_word(
        &self,
        word_id: i64,
        language: &str,
        level: i32,
        cache: &mut TopicCache,
    ) -> StoreResult<Vec<Topic>> {
        let sql = format!(
            "SELECT {} FROM {} t INNER JOIN {} wt ON t.id = wt.topic_id \
             AND wt.word_id = ? AND t.language = ? AND t.level = ? ORDER BY t.id",
            aliased("t", &TOPIC_COLUMNS),
            TABLE_TOPIC,
            TABLE_WORD_TOPIC
        );
        let mut params = QueryParams::new();
        params.push_integer(word_id);
        params.push_text(language);
        params.push_integer(i64::from(level));

        let rows = self.query_topic_rows(&sql, &params)?;
        rows.into_iter()
            .map(|row| self.resolve_topic(row, cache, 0))
            .collect()
    }

    fn root_topic_cache(&self, language: Option<&str>) -> StoreResult<TopicCache> {
        Ok(self
            .find_root_topics(language)?
            .into_iter()
            .filter_map(|t| t.id.map(|id| (id, t)))
            .collect())
    }

    fn query_topic_rows(&self, sql: &str, params: &QueryParams) -> StoreResult<Vec<TopicRow>> {
        let mut stmt = logged(self.conn.prepare(sql), "Topic query")?;
        let rows = logged(stmt.query_map(params.as_params(), TopicRow::from_row), "Topic query")?;
        logged(rows.collect(), "Topic row")
    }

    /// Turn a row into a topic with its root chain attached, consulting the
    /// cache first and loading missing roots by id
    fn resolve_topic(&self, row: TopicRow, cache: &mut TopicCache, depth: usize) -> StoreResult<Topic> {
        if let Some(topic) = cache.get(&row.id) {
            return Ok(topic.clone());
        }
        if depth > MAX_TOPIC_DEPTH {
            return Err(StoreError::InvalidState(format!(
                "Topic {} has a root chain deeper than {}",
                row.id, MAX_TOPIC_DEPTH
            )));
        }

        let mut topic = Topic {
            id: Some(row.id),
            name: row.name,
            language: row.language,
            level: row.level,
            root: None,
        };
        if let Some(root_id) = row.root_id {
            topic.root = self
                .load_topic(root_id, cache, depth + 1)?
                .map(Box::new);
        }

        cache.insert(row.id, topic.clone());
        Ok(topic)
    }

    fn load_topic(&self, id: i64, cache: &mut TopicCache, depth: usize) -> StoreResult<Option<Topic>> {
        if let Some(topic) = cache.get(&id) {
            return Ok(Some(topic.clone()));
        }
        let sql = select_query(TABLE_TOPIC, &TOPIC_COLUMNS, Some("id = ?"), false);
        let row = logged(
            self.conn.query_row(&sql, [id], TopicRow::from_row).optional(),
            "Topic by id",
        )?;
        row.map(|row| self.resolve_topic(row, cache, depth)).transpose()
    }

    // =========================================================================
    // Languages
    // =========================================================================

    /// Distinct source languages of stored words
    pub fn language_from(&self) -> StoreResult<Vec<String>> {
        let sql = format!(
            "{} ORDER BY language",
            select_query(TABLE_WORD, &["language"], None, true)
        );
        self.query_strings(&sql, &QueryParams::new())
    }

    /// Distinct translation languages, optionally only for words of `language`
    pub fn language_to(&self, language: Option<&str>) -> StoreResult<Vec<String>> {
        let mut params = QueryParams::new();
        let sql = match language {
            Some(language) => {
                params.push_text(language);
                format!(
                    "SELECT DISTINCT t.language FROM {} t INNER JOIN {} w \
                     ON w.id = t.word_id AND w.language = ? ORDER BY t.language",
                    TABLE_TRANSLATION, TABLE_WORD
                )
            }
            None => format!(
                "{} ORDER BY language",
                select_query(TABLE_TRANSLATION, &["language"], None, true)
            ),
        };
        self.query_strings(&sql, &params)
    }

    fn query_strings(&self, sql: &str, params: &QueryParams) -> StoreResult<Vec<String>> {
        let mut stmt = logged(self.conn.prepare(sql), "Language query")?;
        let rows = logged(stmt.query_map(params.as_params(), |row| row.get(0)), "Language query")?;
        logged(rows.collect(), "Language row")
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Update the scalar columns of a stored word
    pub fn update_word(&self, word: &Word) -> StoreResult<bool> {
        let id = word.id.ok_or_else(|| StoreError::missing_id("Word"))?;
        let sql = update_query(
            TABLE_WORD,
            &["language", "word", "additional_info", "article", "knowledge"],
            "id = ?",
        );
        let changed = logged(
            self.conn.execute(
                &sql,
                params![
                    word.language,
                    word.word,
                    word.additional_information,
                    word.article,
                    word.knowledge,
                    id
                ],
            ),
            "Word update",
        )?;
        Ok(changed > 0)
    }

    /// Update a stored topic. A root, if present, must be persisted.
    pub fn update_topic(&self, topic: &Topic) -> StoreResult<bool> {
        let id = topic.id.ok_or_else(|| StoreError::missing_id("Topic"))?;
        let root_id = match topic.root.as_deref() {
            Some(root) => Some(root.id.ok_or_else(|| StoreError::missing_id("Root topic"))?),
            None => None,
        };
        let sql = update_query(TABLE_TOPIC, &["language", "level", "root_id", "name"], "id = ?");
        let changed = logged(
            self.conn.execute(
                &sql,
                params![topic.language, topic.level, root_id, topic.name, id],
            ),
            "Topic update",
        )?;
        Ok(changed > 0)
    }

    pub fn update_translation(&self, translation: &Translation) -> StoreResult<bool> {
        let id = translation.id.ok_or_else(|| StoreError::missing_id("Translation"))?;
        let sql = update_query(TABLE_TRANSLATION, &["language", "text"], "id = ?");
        let changed = logged(
            self.conn.execute(
                &sql,
                params![translation.language, translation.translation, id],
            ),
            "Translation update",
        )?;
        Ok(changed > 0)
    }

    pub fn delete_translation(&self, id: i64) -> StoreResult<bool> {
        let sql = delete_query(TABLE_TRANSLATION, "id = ?");
        let deleted = logged(self.conn.execute(&sql, [id]), "Translation delete")?;
        Ok(deleted > 0)
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    pub fn delete_word(&self, id: i64) -> StoreResult<usize> {
        self.delete_words(&[id])
    }

    /// Delete words with their translations and topic links, page by page.
    /// Returns the number of word rows removed.
    pub fn delete_words(&self, word_ids: &[i64]) -> StoreResult<usize> {
        let mut deleted = 0;
        for page in word_ids.chunks(self.page_size) {
            let where_clause = format!("word_id IN ({})", placeholders(page.len()));
            let mut params = QueryParams::new();
            params.extend_integers(page);

            logged(
                self.conn
                    .execute(&delete_query(TABLE_WORD_TOPIC, &where_clause), params.as_params()),
                "Word topic delete",
            )?;
            logged(
                self.conn
                    .execute(&delete_query(TABLE_TRANSLATION, &where_clause), params.as_params()),
                "Translation delete",
            )?;
            let word_clause = format!("id IN ({})", placeholders(page.len()));
            deleted += logged(
                self.conn
                    .execute(&delete_query(TABLE_WORD, &word_clause), params.as_params()),
                "Word delete",
            )?;
        }
        Ok(deleted)
    }

    pub fn word_ids_for_language(&self, language: &str) -> StoreResult<Vec<i64>> {
        let sql = select_query(TABLE_WORD, &["id"], Some("language = ?"), true);
        let mut stmt = logged(self.conn.prepare(&sql), "Word id query")?;
        let rows = logged(stmt.query_map([language], |row| row.get(0)), "Word id query")?;
        logged(rows.collect(), "Word id row")
    }

    /// Delete every word of `language` and then its topics.
    /// Returns the number of words removed.
    pub fn delete_for_language(&self, language: &str) -> StoreResult<usize> {
        let word_ids = self.word_ids_for_language(language)?;
        let deleted = self.delete_words(&word_ids)?;

        // Links from words of other languages would block the topic delete
        logged(
            self.conn.execute(
                "DELETE FROM word_topic WHERE topic_id IN (SELECT id FROM topic WHERE language = ?1)",
                [language],
            ),
            "Word topic delete",
        )?;
        logged(
            self.conn
                .execute(&delete_query(TABLE_TOPIC, "language = ?"), [language]),
            "Topic delete",
        )?;

        debug!("Deleted {} words for language {}", deleted, language);
        Ok(deleted)
    }

    // =========================================================================
    // Configuration presets
    // =========================================================================

    /// Store an opaque payload under `name`, replacing any previous one
    pub fn upsert_configuration_preset(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        logged(
            self.conn.execute(
                "INSERT INTO configuration_preset (name, data) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET data = excluded.data",
                params![name, data],
            ),
            "Preset upsert",
        )?;
        Ok(())
    }

    pub fn get_configuration_preset(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let sql = select_query(TABLE_CONFIGURATION_PRESET, &["data"], Some("name = ?"), false);
        let data = self
            .conn
            .query_row(&sql, [name], |row| row.get::<_, Option<Vec<u8>>>(0))
            .optional();
        Ok(logged(data, "Preset lookup")?.flatten())
    }

    pub fn delete_configuration_preset(&self, name: &str) -> StoreResult<bool> {
        let sql = delete_query(TABLE_CONFIGURATION_PRESET, "name = ?");
        let deleted = logged(self.conn.execute(&sql, [name]), "Preset delete")?;
        Ok(deleted > 0)
    }

    pub fn configuration_preset_names(&self) -> StoreResult<Vec<String>> {
        let sql = format!(
            "{} ORDER BY name",
            select_query(TABLE_CONFIGURATION_PRESET, &["name"], None, false)
        );
        self.query_strings(&sql, &QueryParams::new())
    }
}
