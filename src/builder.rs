//! Structured query assembly.
//!
//! Turns typed parameters into a single `SELECT` statement. Clauses are
//! always emitted in the order `SELECT`, `FROM`, `WHERE`, `GROUP BY`,
//! `ORDER BY`, `LIMIT`, and a clause without content is left out entirely.
//!
//! Identifiers (table, columns, grouping and ordering expressions) are copied
//! verbatim and condition text values are quoted without escaping. The
//! builder is a formatting aid, not a sanitizer; run its output through
//! [`crate::lint`] to surface quote characters.
//!
//! # Example
//!
//! ```
//! use sql_tool_server::builder::{Condition, Literal, StructuredQuery};
//!
//! let mut query = StructuredQuery::new("orders");
//! query.where_conditions.insert(
//!     "status".into(),
//!     Condition::Comparison {
//!         operator: ">".into(),
//!         value:    Literal::from(5)
//!     }
//! );
//!
//! assert_eq!(query.build(), "SELECT * FROM orders WHERE status > 5");
//! ```

mod condition;

use compact_str::CompactString;
pub use condition::{Condition, Conditions, Literal, conditions_from_value, parse_conditions};
use serde::Serialize;
use smallvec::SmallVec;

use crate::error::{ToolError, input_format_error};

/// Projected column list (typically short)
pub type ColumnVec = SmallVec<[CompactString; 8]>;

/// Parameters of a structured `SELECT`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructuredQuery {
    pub table:            String,
    /// Empty projects `*`
    pub columns:          ColumnVec,
    pub where_conditions: Conditions,
    pub group_by:         Option<String>,
    pub order_by:         Option<String>,
    pub limit:            Option<u64>
}

impl StructuredQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    /// Assemble the SQL text.
    pub fn build(&self) -> String {
        let projection = if self.columns.is_empty() {
            String::from("*")
        } else {
            let columns: Vec<&str> = self.columns.iter().map(CompactString::as_str).collect();
            columns.join(", ")
        };
        let mut sql = format!("SELECT {} FROM {}", projection, self.table);

        if !self.where_conditions.is_empty() {
            let rendered: Vec<String> = self
                .where_conditions
                .iter()
                .map(|(column, condition)| condition.render(column))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&rendered.join(" AND "));
        }
        if let Some(group_by) = non_blank(&self.group_by) {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);
        }
        if let Some(order_by) = non_blank(&self.order_by) {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        sql
    }
}

fn non_blank(clause: &Option<String>) -> Option<&str> {
    clause.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Convenience wrapper over [`StructuredQuery::build`].
pub fn build(
    table: &str,
    columns: Option<&[&str]>,
    where_conditions: Option<Conditions>,
    group_by: Option<&str>,
    order_by: Option<&str>,
    limit: Option<u64>
) -> String {
    StructuredQuery {
        table:            table.to_string(),
        columns:          columns
            .unwrap_or_default()
            .iter()
            .map(|c| CompactString::from(*c))
            .collect(),
        where_conditions: where_conditions.unwrap_or_default(),
        group_by:         group_by.map(String::from),
        order_by:         order_by.map(String::from),
        limit
    }
    .build()
}

/// Split a comma-separated column list into trimmed tokens.
///
/// Blank input yields an empty list (project `*`).
///
/// # Errors
///
/// Returns [`ToolError::InputFormat`] for an empty token such as `"a,,b"`.
pub fn parse_columns(text: &str) -> Result<ColumnVec, ToolError> {
    if text.trim().is_empty() {
        return Ok(ColumnVec::new());
    }
    text.split(',')
        .map(str::trim)
        .map(|token| {
            if token.is_empty() {
                Err(input_format_error(format!(
                    "empty column name in list '{}'",
                    text
                )))
            } else {
                Ok(CompactString::from(token))
            }
        })
        .collect()
}
