//! Live schema introspection.
//!
//! [`SchemaCatalog`] reads table and column metadata from the connected
//! database. Nothing is cached: every [`SchemaCatalog::describe_all`] call
//! builds a fresh [`SchemaSnapshot`] with one round trip per table.
//!
//! # Example
//!
//! ```
//! use sql_tool_server::schema::{ColumnDescriptor, KeyRole, SchemaSnapshot, TableSchema};
//!
//! let mut snapshot = SchemaSnapshot::default();
//! snapshot.insert(TableSchema {
//!     table_name: "users".into(),
//!     columns:    vec![ColumnDescriptor::new("id", "int").with_key_role(KeyRole::Primary)]
//! });
//!
//! assert!(snapshot.to_summary().contains("id int NOT NULL PRIMARY KEY"));
//! ```

mod types;

use tracing::debug;
pub use types::{ColumnDescriptor, KeyRole, SchemaSnapshot, TableSchema};

use crate::{
    builder::Literal,
    db::{Backend, Row},
    error::ToolError
};

const LIST_TABLES_SQL: &str = "SHOW TABLES";

const DESCRIBE_TABLE_SQL: &str = "SELECT COLUMN_NAME AS name, COLUMN_TYPE AS declared_type, \
     IS_NULLABLE AS nullable, COLUMN_KEY AS key_role, COLUMN_DEFAULT AS default_value, \
     EXTRA AS extra \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

/// Metadata reader bound to one backend.
pub struct SchemaCatalog<'a> {
    backend: &'a dyn Backend
}

impl<'a> SchemaCatalog<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend
        }
    }

    /// Table names in the server's listing order.
    pub async fn list_tables(&self) -> Result<Vec<String>, ToolError> {
        let rows = self.backend.fetch_all(LIST_TABLES_SQL, &[]).await?;
        // single column named `Tables_in_<db>`
        Ok(rows
            .iter()
            .filter_map(|row| row.values().next())
            .filter_map(|cell| cell.as_text().map(|s| s.into_owned()))
            .collect())
    }

    /// Columns of `table` in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NotFound`] if the active database has no such
    /// table.
    pub async fn describe_table(&self, table: &str) -> Result<TableSchema, ToolError> {
        let rows = self
            .backend
            .fetch_all(DESCRIBE_TABLE_SQL, &[Literal::from(table)])
            .await?;
        if rows.is_empty() {
            return Err(ToolError::NotFound(format!("table '{}' does not exist", table)));
        }
        Ok(TableSchema {
            table_name: table.to_string(),
            columns:    rows.iter().map(column_from_row).collect()
        })
    }

    /// Snapshot of every table.
    pub async fn describe_all(&self) -> Result<SchemaSnapshot, ToolError> {
        let mut snapshot = SchemaSnapshot::default();
        for table in self.list_tables().await? {
            snapshot.insert(self.describe_table(&table).await?);
        }
        debug!(tables = snapshot.len(), "schema snapshot built");
        Ok(snapshot)
    }
}

fn text_cell(row: &Row, key: &str) -> Option<String> {
    row.get(key)
        .filter(|v| !v.is_null())
        .and_then(|v| v.as_text().map(|s| s.into_owned()))
}

fn column_from_row(row: &Row) -> ColumnDescriptor {
    ColumnDescriptor {
        name:          text_cell(row, "name").unwrap_or_default().into(),
        declared_type: text_cell(row, "declared_type").unwrap_or_default(),
        nullable:      text_cell(row, "nullable").is_some_and(|v| v.eq_ignore_ascii_case("YES")),
        key_role:      KeyRole::from_marker(&text_cell(row, "key_role").unwrap_or_default()),
        default_value: text_cell(row, "default_value"),
        extra:         text_cell(row, "extra").unwrap_or_default()
    }
}
