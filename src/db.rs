//! Database access seam.
//!
//! Every component that needs live data talks to a [`Backend`]. The
//! production implementation is [`MySqlBackend`], which owns exactly one
//! connection; tests substitute in-memory backends.
//!
//! # Statement execution
//!
//! Statements are always sent as prepared statements. The MySQL protocol
//! accepts a single statement per prepare, so `SELECT 1; DROP TABLE t` is
//! rejected by the server rather than executed piecewise. This does not widen
//! the read-only guard, which still inspects only the leading keyword.

mod mysql;
mod value;

use async_trait::async_trait;
pub use mysql::MySqlBackend;
pub use value::{Row, SqlValue, settle_cell};

use crate::{builder::Literal, error::ToolError};

/// Source of rows for a single SQL statement.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute `sql` with positional `params` bound to `?` placeholders and
    /// return every row in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Execution`] for any driver-level failure.
    async fn fetch_all(&self, sql: &str, params: &[Literal]) -> Result<Vec<Row>, ToolError>;
}
