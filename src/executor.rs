//! Guarded query execution.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{
    builder::Literal,
    db::{Backend, Row},
    error::ToolError,
    guard
};

/// Outcome of a guarded query.
///
/// Failures are reported in-band (`success: false`) rather than as `Err`, so
/// the caller always receives a well-formed result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub success:   bool,
    pub rows:      Vec<Map<String, Value>>,
    pub row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:     Option<String>
}

impl QueryResult {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let rows: Vec<Map<String, Value>> = rows.into_iter().map(normalize_row).collect();
        Self {
            success: true,
            row_count: rows.len(),
            rows,
            error: None
        }
    }

    pub fn failure(err: &ToolError) -> Self {
        Self {
            success:   false,
            rows:      Vec::new(),
            row_count: 0,
            error:     Some(err.to_string())
        }
    }
}

/// Convert a driver row to JSON; temporal cells become ISO-8601 strings.
pub fn normalize_row(row: Row) -> Map<String, Value> {
    row.into_iter()
        .map(|(column, value)| (column, value.into_json()))
        .collect()
}

/// Run `text` if the guard allows it.
///
/// A rejected statement never reaches `backend`.
pub async fn execute_guarded(backend: &dyn Backend, text: &str, params: &[Literal]) -> QueryResult {
    let keyword = match guard::check(text) {
        Ok(keyword) => keyword,
        Err(err) => {
            warn!(error = %err, "statement rejected by guard");
            return QueryResult::failure(&err);
        }
    };
    match backend.fetch_all(text, params).await {
        Ok(rows) => {
            info!(keyword = %keyword, rows = rows.len(), "query executed");
            QueryResult::from_rows(rows)
        }
        Err(err) => {
            warn!(keyword = %keyword, error = %err, "query failed");
            QueryResult::failure(&err)
        }
    }
}
