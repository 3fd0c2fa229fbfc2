use super::{Finding, LintRule, RuleCategory, RuleInfo, Severity};

fn finding(info: RuleInfo, message: &'static str) -> Finding {
    Finding {
        rule_id:   info.id,
        rule_name: info.name,
        message,
        severity:  info.severity,
        category:  info.category
    }
}

/// Literal `SELECT *` projection
pub struct SelectStar;

impl LintRule for SelectStar {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "LINT001",
            name:     "SELECT * usage",
            severity: Severity::Info,
            category: RuleCategory::Style
        }
    }

    fn check(&self, _raw: &str, upper: &str) -> Option<Finding> {
        upper.contains("SELECT *").then(|| {
            finding(
                self.info(),
                "Consider selecting only the columns you need instead of SELECT *"
            )
        })
    }
}

/// SELECT without LIMIT
pub struct MissingLimit;

impl LintRule for MissingLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "LINT002",
            name:     "Missing LIMIT",
            severity: Severity::Warning,
            category: RuleCategory::Performance
        }
    }

    fn check(&self, _raw: &str, upper: &str) -> Option<Finding> {
        (upper.contains("SELECT") && !upper.contains("LIMIT")).then(|| {
            finding(
                self.info(),
                "Consider adding a LIMIT clause to bound the number of returned rows"
            )
        })
    }
}

/// SELECT without WHERE
pub struct MissingWhere;

impl LintRule for MissingWhere {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "LINT003",
            name:     "Missing WHERE",
            severity: Severity::Warning,
            category: RuleCategory::Performance
        }
    }

    fn check(&self, _raw: &str, upper: &str) -> Option<Finding> {
        (upper.contains("SELECT") && !upper.contains("WHERE")).then(|| {
            finding(
                self.info(),
                "Consider adding a WHERE clause to avoid scanning the entire table"
            )
        })
    }
}

/// SELECT without ORDER BY
pub struct MissingOrderBy;

impl LintRule for MissingOrderBy {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "LINT004",
            name:     "Missing ORDER BY",
            severity: Severity::Info,
            category: RuleCategory::Style
        }
    }

    fn check(&self, _raw: &str, upper: &str) -> Option<Finding> {
        (upper.contains("SELECT") && !upper.contains("ORDER BY")).then(|| {
            finding(
                self.info(),
                "Consider adding ORDER BY for a deterministic row order"
            )
        })
    }
}

/// Quote, statement separator or comment characters anywhere in the text.
///
/// Literal values interpolated by the query builder are not escaped, so any
/// of these characters may come from caller-supplied data.
pub struct InjectionRisk;

const RISKY_SEQUENCES: [&str; 4] = ["'", "\"", ";", "--"];

impl LintRule for InjectionRisk {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "LINT005",
            name:     "Possible SQL injection",
            severity: Severity::Error,
            category: RuleCategory::Security
        }
    }

    fn check(&self, raw: &str, _upper: &str) -> Option<Finding> {
        RISKY_SEQUENCES.iter().any(|s| raw.contains(s)).then(|| {
            finding(
                self.info(),
                "Warning: query contains quotes, semicolons or comment markers; use parameterized \
                 queries to prevent SQL injection"
            )
        })
    }
}
