//! Foreign-key relationship extraction.

use serde::Serialize;
use tracing::debug;

use crate::{
    db::{Backend, Row},
    error::ToolError
};

const FOREIGN_KEYS_SQL: &str = "SELECT TABLE_NAME AS table_name, COLUMN_NAME AS column_name, \
     CONSTRAINT_NAME AS constraint_name, REFERENCED_TABLE_NAME AS referenced_table, \
     REFERENCED_COLUMN_NAME AS referenced_column \
     FROM information_schema.KEY_COLUMN_USAGE \
     WHERE TABLE_SCHEMA = DATABASE() AND REFERENCED_TABLE_NAME IS NOT NULL \
     ORDER BY TABLE_NAME, CONSTRAINT_NAME, ORDINAL_POSITION";

/// One referential constraint column: `table.column -> referenced_table.referenced_column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyEdge {
    pub table:             String,
    pub column:            String,
    pub constraint_name:   String,
    pub referenced_table:  String,
    pub referenced_column: String
}

/// Every foreign-key edge of the active database.
///
/// Composite keys yield one edge per column. No transitive closure is
/// computed; a database without foreign keys yields an empty list.
pub async fn analyze(backend: &dyn Backend) -> Result<Vec<ForeignKeyEdge>, ToolError> {
    let rows = backend.fetch_all(FOREIGN_KEYS_SQL, &[]).await?;
    let edges: Vec<ForeignKeyEdge> = rows.iter().map(edge_from_row).collect();
    debug!(edges = edges.len(), "foreign keys analyzed");
    Ok(edges)
}

fn cell(row: &Row, key: &str) -> String {
    row.get(key)
        .and_then(|v| v.as_text().map(|s| s.into_owned()))
        .unwrap_or_default()
}

fn edge_from_row(row: &Row) -> ForeignKeyEdge {
    ForeignKeyEdge {
        table:             cell(row, "table_name"),
        column:            cell(row, "column_name"),
        constraint_name:   cell(row, "constraint_name"),
        referenced_table:  cell(row, "referenced_table"),
        referenced_column: cell(row, "referenced_column")
    }
}
