//! Offline lint command.

use super::{
    helpers::{calculate_exit_code, create_output_options, read_queries_input, split_statements},
    types::{LintParams, LintResult}
};
use crate::{error::AppResult, lint::Linter, output::format_lint_reports};

/// Lints every statement of the input.
///
/// No database connection is made. Each `;`-separated statement gets its
/// own report, in input order.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn run_lint(params: &LintParams) -> AppResult<LintResult> {
    let sql = read_queries_input(&params.input)?;
    let linter = Linter::new();
    let reports: Vec<_> = split_statements(&sql)
        .into_iter()
        .map(|statement| linter.report(statement))
        .collect();

    let opts = create_output_options(params.format, params.no_color);
    Ok(LintResult {
        exit_code: calculate_exit_code(&reports),
        output: format_lint_reports(&reports, &opts),
        reports
    })
}
