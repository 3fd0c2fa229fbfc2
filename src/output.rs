use colored::Colorize;
use serde::Serialize;

use crate::lint::{LOOKS_GOOD, LintReport, Severity};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Finding counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LintSummary {
    pub queries:  usize,
    pub errors:   usize,
    pub warnings: usize,
    pub infos:    usize
}

impl LintSummary {
    pub fn from_reports(reports: &[LintReport]) -> Self {
        let mut summary = Self {
            queries: reports.len(),
            ..Default::default()
        };
        for finding in reports.iter().flat_map(|r| &r.findings) {
            match finding.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1
            }
        }
        summary
    }
}

/// Lint reports for serialization
#[derive(Debug, Serialize)]
pub struct LintOutput<'a> {
    pub reports: &'a [LintReport],
    pub summary: LintSummary
}

/// Format lint reports based on output options
pub fn format_lint_reports(reports: &[LintReport], opts: &OutputOptions) -> String {
    let output = LintOutput {
        reports,
        summary: LintSummary::from_reports(reports)
    };
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&output).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&output).unwrap_or_default(),
        OutputFormat::Text => format_text(&output, opts)
    }
}

fn format_text(output: &LintOutput<'_>, opts: &OutputOptions) -> String {
    let mut text = String::new();
    if opts.colored {
        text.push_str(&"=== SQL Lint Report ===\n\n".bold().to_string());
    } else {
        text.push_str("=== SQL Lint Report ===\n\n");
    }

    for (i, report) in output.reports.iter().enumerate() {
        let header = format!("Query #{}:", i + 1);
        if opts.colored {
            text.push_str(&header.cyan().bold().to_string());
        } else {
            text.push_str(&header);
        }
        text.push('\n');
        text.push_str(&format!("{}\n", report.query));

        if report.is_clean() {
            let line = format!("  {}", LOOKS_GOOD);
            if opts.colored {
                text.push_str(&line.green().to_string());
            } else {
                text.push_str(&line);
            }
            text.push('\n');
        }
        for finding in &report.findings {
            let label = format!("[{}]", finding.severity);
            let label = if !opts.colored {
                label
            } else {
                match finding.severity {
                    Severity::Error => label.red().bold().to_string(),
                    Severity::Warning => label.yellow().to_string(),
                    Severity::Info => label.blue().to_string()
                }
            };
            text.push_str(&format!(
                "  {} {} {}: {}\n",
                label, finding.rule_id, finding.rule_name, finding.message
            ));
        }
        text.push('\n');
    }

    let s = output.summary;
    text.push_str(&format!(
        "Summary: {} queries, {} errors, {} warnings, {} info\n",
        s.queries, s.errors, s.warnings, s.infos
    ));
    text
}
