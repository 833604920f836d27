/*!
 * SQL text builders for the dynamic queries of the word store.
 *
 * Filters are optional, so statements are assembled at runtime together
 * with their positional parameters.
 */

use rusqlite::types::Value;

/// `?, ?, ?` with `count` placeholders
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// `column = ?` when a value will be bound, `column IS NULL` otherwise.
///
/// `= NULL` never matches in SQL, so a missing value must be compared
/// with `IS NULL` and must not consume a parameter.
pub fn null_or_equals(column: &str, has_value: bool) -> String {
    if has_value {
        format!("{} = ?", column)
    } else {
        format!("{} IS NULL", column)
    }
}

pub fn select_query(table: &str, columns: &[&str], where_clause: Option<&str>, distinct: bool) -> String {
    let mut sql = format!(
        "SELECT {}{} FROM {}",
        if distinct { "DISTINCT " } else { "" },
        columns.join(", "),
        table
    );
    if let Some(clause) = where_clause.filter(|c| !c.is_empty()) {
        sql.push_str(" WHERE ");
        sql.push_str(clause);
    }
    sql
}

pub fn insert_query(table: &str, columns: &[&str]) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders(columns.len())
    )
}

pub fn update_query(table: &str, columns: &[&str], where_clause: &str) -> String {
    let assignments: Vec<String> = columns.iter().map(|c| format!("{} = ?", c)).collect();
    format!("UPDATE {} SET {} WHERE {}", table, assignments.join(", "), where_clause)
}

pub fn delete_query(table: &str, where_clause: &str) -> String {
    format!("DELETE FROM {} WHERE {}", table, where_clause)
}

/// Prefix every column with a table alias: `w.id, w.language, ...`
pub fn aliased(alias: &str, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("{}.{}", alias, c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Positional parameters collected while a statement is assembled
#[derive(Debug, Default)]
pub struct QueryParams {
    values: Vec<Value>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, value: &str) {
        self.values.push(Value::Text(value.to_string()));
    }

    pub fn push_integer(&mut self, value: i64) {
        self.values.push(Value::Integer(value));
    }

    pub fn extend_integers(&mut self, values: &[i64]) {
        self.values.extend(values.iter().map(|v| Value::Integer(*v)));
    }

    pub fn extend_texts(&mut self, values: &[String]) {
        self.values.extend(values.iter().map(|v| Value::Text(v.clone())));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_params(&self) -> rusqlite::ParamsFromIter<std::slice::Iter<'_, Value>> {
        rusqlite::params_from_iter(self.values.iter())
    }
}
