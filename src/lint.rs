//! Static suggestions for a single SQL string.
//!
//! Checks are plain text inspections of the upper-cased statement; nothing is
//! parsed. All applicable checks are reported, always in this order:
//!
//! | ID | Name | Severity |
//! |----|------|----------|
//! | LINT001 | `SELECT *` usage | Info |
//! | LINT002 | SELECT without `LIMIT` | Warning |
//! | LINT003 | SELECT without `WHERE` | Warning |
//! | LINT004 | SELECT without `ORDER BY` | Info |
//! | LINT005 | `'`, `"`, `;` or `--` present | Error |
//!
//! A statement that triggers none of them yields [`LOOKS_GOOD`].
//!
//! # Example
//!
//! ```
//! use sql_tool_server::lint::{LOOKS_GOOD, lint};
//!
//! assert_eq!(lint("SELECT * FROM t").len(), 4);
//! assert_eq!(
//!     lint("SELECT id FROM t WHERE id=1 ORDER BY id LIMIT 5"),
//!     vec![LOOKS_GOOD.to_string()]
//! );
//! ```

mod checks;
mod types;

pub use types::{Finding, LintReport, RuleCategory, RuleInfo, Severity};

/// Returned alone when no check applies.
pub const LOOKS_GOOD: &str = "Query looks good! No obvious improvements suggested.";

/// A single text check.
pub trait LintRule: Send + Sync {
    fn info(&self) -> RuleInfo;

    /// `raw` is the statement as given, `upper` its upper-cased form.
    fn check(&self, raw: &str, upper: &str) -> Option<Finding>;
}

/// Ordered check list.
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

impl Linter {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(checks::SelectStar),
                Box::new(checks::MissingLimit),
                Box::new(checks::MissingWhere),
                Box::new(checks::MissingOrderBy),
                Box::new(checks::InjectionRisk),
            ]
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = RuleInfo> + '_ {
        self.rules.iter().map(|r| r.info())
    }

    pub fn report(&self, sql: &str) -> LintReport {
        let upper = sql.to_uppercase();
        LintReport {
            query:    sql.to_string(),
            findings: self
                .rules
                .iter()
                .filter_map(|rule| rule.check(sql, &upper))
                .collect()
        }
    }
}

/// Suggestion strings for `sql`, or [`LOOKS_GOOD`] alone.
pub fn lint(sql: &str) -> Vec<String> {
    lint_report(sql).messages()
}

pub fn lint_report(sql: &str) -> LintReport {
    Linter::new().report(sql)
}
