//! Read-only statement guard.
//!
//! The guard looks at the first whitespace-delimited token of a statement and
//! nothing else. It is the only policy check in front of the connection.
//!
//! # Limitations
//!
//! Content after the leading keyword is not inspected: `SELECT 1; DROP TABLE
//! t` classifies as `SELECT`. What keeps the trailing statement from running
//! is the backend sending every statement as a single prepared statement (see
//! [`crate::db`]), not this module.

use crate::error::ToolError;

/// Leading keywords allowed to reach the connection.
pub const READ_ONLY_KEYWORDS: [&str; 4] = ["SELECT", "SHOW", "DESCRIBE", "EXPLAIN"];

/// Upper-cased first whitespace-delimited token; empty for blank input.
pub fn classify(text: &str) -> String {
    text.split_whitespace()
        .next()
        .map(str::to_uppercase)
        .unwrap_or_default()
}

pub fn is_read_only(keyword: &str) -> bool {
    READ_ONLY_KEYWORDS.contains(&keyword)
}

/// Classify `text` and reject it unless the keyword is whitelisted.
///
/// # Errors
///
/// Returns [`ToolError::PolicyViolation`] naming the rejected keyword.
pub fn check(text: &str) -> Result<String, ToolError> {
    let keyword = classify(text);
    if is_read_only(&keyword) {
        return Ok(keyword);
    }
    let shown = if keyword.is_empty() { "empty statement" } else { keyword.as_str() };
    Err(ToolError::PolicyViolation(format!(
        "{} is not permitted; only {} statements are allowed",
        shown,
        READ_ONLY_KEYWORDS.join(", ")
    )))
}
