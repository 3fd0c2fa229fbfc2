//! Parameter and result types for the CLI commands.

use crate::{cli::Format, lint::LintReport};

/// Parameters for the lint command
#[derive(Debug, Clone)]
pub struct LintParams {
    /// File path, or "-" for stdin
    pub input:    String,
    pub format:   Format,
    pub no_color: bool
}

/// Result of the lint command
#[derive(Debug, Clone)]
pub struct LintResult {
    pub exit_code: i32,
    pub output:    String,
    pub reports:   Vec<LintReport>
}

/// Connection and logging overrides for the serve command.
///
/// Every `Some` field replaces the value loaded from files and environment.
#[derive(Debug, Clone, Default)]
pub struct ServeParams {
    pub database_url: Option<String>,
    pub host:         Option<String>,
    pub port:         Option<u16>,
    pub user:         Option<String>,
    pub password:     Option<String>,
    pub database:     Option<String>,
    pub log_level:    Option<String>
}
