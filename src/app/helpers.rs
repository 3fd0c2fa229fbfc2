//! Helper functions for CLI operations.
//!
//! This module provides utility functions used by the commands for reading
//! input, splitting statements, calculating exit codes and layering CLI
//! overrides onto the loaded configuration.

use std::{
    fs::read_to_string,
    io::{self, Read}
};

use super::{convert::convert_format, types::ServeParams};
use crate::{
    cli::Format,
    config::Config,
    error::{AppResult, file_read_error},
    lint::{LintReport, Severity},
    output::OutputOptions
};

/// Calculates the process exit code based on finding severities.
///
/// Returns an exit code reflecting the highest severity found:
/// - `0` - No findings or only informational messages
/// - `1` - At least one warning present
/// - `2` - At least one error present
///
/// # Example
///
/// ```
/// use sql_tool_server::{app::calculate_exit_code, lint::lint_report};
///
/// let clean = lint_report("SELECT id FROM t WHERE id = 1 ORDER BY id LIMIT 1");
/// assert_eq!(calculate_exit_code(&[clean]), 0);
///
/// let unbounded = lint_report("SELECT id FROM t");
/// assert_eq!(calculate_exit_code(&[unbounded]), 1);
/// ```
pub fn calculate_exit_code(reports: &[LintReport]) -> i32 {
    match reports.iter().filter_map(LintReport::highest_severity).max() {
        Some(Severity::Error) => 2,
        Some(Severity::Warning) => 1,
        Some(Severity::Info) | None => 0
    }
}

/// Reads SQL text from a file or stdin.
///
/// Supports reading from a file path or from standard input when the
/// path is "-".
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_queries_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Splits SQL text into trimmed, non-empty statements.
///
/// A statement ends at a `;` outside quotes that closes its line. A `;`
/// followed by more text on the same line chains statements and stays in
/// the statement text, where the injection-risk check reports it.
///
/// # Example
///
/// ```
/// use sql_tool_server::app::split_statements;
///
/// assert_eq!(
///     split_statements("SELECT 1;\n\nSELECT 2;  "),
///     vec!["SELECT 1", "SELECT 2"]
/// );
/// assert_eq!(
///     split_statements("SELECT 1; DROP TABLE t"),
///     vec!["SELECT 1; DROP TABLE t"]
/// );
/// ```
pub fn split_statements(sql: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut quote = None;
    for (i, ch) in sql.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(ch),
            (None, ';') if closes_line(&sql[i + 1..]) => {
                statements.push(&sql[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    statements.push(&sql[start..]);
    statements
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn closes_line(rest: &str) -> bool {
    rest.lines()
        .next()
        .is_none_or(|line| line.trim_matches(|c: char| c == ';' || c.is_whitespace()).is_empty())
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, no_color: bool) -> OutputOptions {
    OutputOptions {
        format:  convert_format(format),
        colored: !no_color
    }
}

/// Applies command-line overrides, the highest configuration layer.
pub fn apply_serve_overrides(config: &mut Config, params: &ServeParams) {
    let db = &mut config.database;
    if let Some(url) = &params.database_url {
        db.url = Some(url.clone());
    }
    if let Some(host) = &params.host {
        db.host = host.clone();
    }
    if let Some(port) = params.port {
        db.port = port;
    }
    if let Some(user) = &params.user {
        db.user = user.clone();
    }
    if let Some(password) = &params.password {
        db.password = Some(password.clone());
    }
    if let Some(database) = &params.database {
        db.database = Some(database.clone());
    }
    if let Some(level) = &params.log_level {
        config.logging.level = level.clone();
    }
}
