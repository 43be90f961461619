// src/models/schema.rs

use serde::{Deserialize, Serialize};

/// The descriptive catalog of the target database exposed to the
/// participant. Fetched once at attempt start, immutable afterwards.
///
/// Invariants (guaranteed by the schema introspection endpoint): table
/// names are unique within a schema, column names are unique within a
/// table, and both sequences keep the catalog order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaMetadata {
    pub tables: Vec<TableMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    pub columns: Vec<ColumnMetadata>,
}

/// One column. The key flags are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,

    /// Provider-specific type name (e.g. "varchar", "int").
    #[serde(rename = "type")]
    pub column_type: String,

    #[serde(rename = "isNullable")]
    pub is_nullable: bool,

    #[serde(rename = "isPrimaryKey")]
    pub is_primary_key: bool,

    #[serde(rename = "isForeignKey")]
    pub is_foreign_key: bool,

    /// Present only when `is_foreign_key` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ForeignKeyRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
}

impl SchemaMetadata {
    /// Total column count across all tables. Used for sizing the
    /// autocomplete candidate buffer.
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}
