// src/complete.rs

use std::collections::HashSet;

use crate::models::schema::SchemaMetadata;

/// Fixed keyword/function vocabulary offered alongside schema objects.
pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT",
    "FROM",
    "WHERE",
    "AND",
    "OR",
    "NOT",
    "JOIN",
    "LEFT JOIN",
    "INNER JOIN",
    "RIGHT JOIN",
    "FULL JOIN",
    "CROSS JOIN",
    "ON",
    "USING",
    "ORDER BY",
    "GROUP BY",
    "HAVING",
    "DISTINCT",
    "ALL",
    "LIMIT",
    "OFFSET",
    "TOP",
    "AS",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "IN",
    "BETWEEN",
    "LIKE",
    "IS",
    "NULL",
    "UNION",
    "UNION ALL",
    "INTERSECT",
    "EXCEPT",
    "WITH",
    "CTE",
    "COUNT",
    "SUM",
    "AVG",
    "MIN",
    "MAX",
    "CONCAT",
    "SUBSTRING",
    "UPPER",
    "LOWER",
    "TRIM",
    "CAST",
    "CONVERT",
    "DATEDIFF",
    "GETDATE",
];

/// Relevance boosts per candidate kind. Schema objects must outrank
/// generic keywords.
const TABLE_BOOST: i32 = 100;
const COLUMN_BOOST: i32 = 90;
const QUALIFIED_COLUMN_BOOST: i32 = 85;
const KEYWORD_BOOST: i32 = 70;

/// Hard cap on the suggestion list length.
pub const MAX_ITEMS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Table,
    Column,
    Keyword,
}

/// One autocomplete suggestion. Transient: recomputed on every
/// keystroke, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionItem {
    pub label: String,
    pub category: Category,
    pub boost: i32,
    pub detail: Option<String>,
}

/// Schema-aware suggestion ranking.
///
/// Purely a function of (schema, prefix): no I/O, no shared state. It
/// runs synchronously on every keystroke, so it has to stay cheap even
/// for schemas with a few hundred columns.
pub struct Completer {
    keywords: Vec<String>,
}

impl Completer {
    /// Builds a completer over a custom keyword vocabulary.
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Produces the ranked, deduplicated suggestion list for a cursor
    /// prefix. An empty prefix means "no filter".
    ///
    /// Candidates are generated in three passes (tables, columns,
    /// keywords), each sorted by descending boost with ties keeping
    /// generation order, then concatenated in that fixed pass order,
    /// deduplicated by case-insensitive label (first occurrence wins)
    /// and truncated to [`MAX_ITEMS`].
    ///
    /// A prefix containing a `.` qualifier is treated as an opaque
    /// string; there is no table/column split-phase matching.
    pub fn complete(&self, schema: &SchemaMetadata, prefix: &str) -> Vec<CompletionItem> {
        let prefix = prefix.to_lowercase();
        let matches = |candidate: &str| -> bool {
            prefix.is_empty() || candidate.to_lowercase().starts_with(&prefix)
        };

        let mut tables = Vec::with_capacity(schema.tables.len());
        for table in &schema.tables {
            if matches(&table.name) {
                tables.push(CompletionItem {
                    label: table.name.clone(),
                    category: Category::Table,
                    boost: TABLE_BOOST,
                    detail: Some(format!("{} columns", table.columns.len())),
                });
            }
        }

        let mut columns = Vec::with_capacity(schema.column_count());
        for table in &schema.tables {
            for column in &table.columns {
                if matches(&column.name) {
                    columns.push(CompletionItem {
                        label: column.name.clone(),
                        category: Category::Column,
                        boost: COLUMN_BOOST,
                        detail: Some(format!("{}.{}", table.name, column.name)),
                    });
                }

                // The table-qualified form is its own candidate and only
                // matches when the qualified string itself matches.
                let qualified = format!("{}.{}", table.name, column.name);
                if matches(&qualified) {
                    columns.push(CompletionItem {
                        label: qualified,
                        category: Category::Column,
                        boost: QUALIFIED_COLUMN_BOOST,
                        detail: Some(column.column_type.clone()),
                    });
                }
            }
        }

        let mut keywords = Vec::new();
        for keyword in &self.keywords {
            if matches(keyword) {
                keywords.push(CompletionItem {
                    label: keyword.clone(),
                    category: Category::Keyword,
                    boost: KEYWORD_BOOST,
                    detail: None,
                });
            }
        }

        let mut items = Vec::with_capacity(tables.len() + columns.len() + keywords.len());
        for mut pass in [tables, columns, keywords] {
            // Vec::sort_by is stable, so equal boosts keep generation order.
            pass.sort_by(|a, b| b.boost.cmp(&a.boost));
            items.extend(pass);
        }

        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.label.to_lowercase()));
        items.truncate(MAX_ITEMS);
        items
    }
}

impl Default for Completer {
    fn default() -> Self {
        Self::new(SQL_KEYWORDS)
    }
}

/// Extracts the word-prefix ending at `cursor` (a byte offset into
/// `text`): the longest trailing run of `[A-Za-z0-9_.]` characters.
/// Returns an empty string at a word boundary.
pub fn word_prefix_at(text: &str, cursor: usize) -> &str {
    let mut end = cursor.min(text.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }

    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(end);

    &head[start..]
}
