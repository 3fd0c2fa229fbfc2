//! Type definitions for the lint checks.
//!
//! - [`Severity`] - Finding severity levels (Info, Warning, Error)
//! - [`RuleCategory`] - Check categories (Performance, Style, Security)
//! - [`Finding`] - One applicable check with its message
//! - [`LintReport`] - All findings for one statement

use serde::Serialize;

/// Severity level of a finding.
///
/// Ordered from lowest to highest severity. The `lint` command's exit code
/// is determined by the highest severity found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// Suggestion, does not affect exit code
    Info,
    /// Likely problem (exit code 1)
    Warning,
    /// Must be addressed (exit code 2)
    Error
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleCategory {
    Performance,
    Style,
    Security
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Performance => write!(f, "Performance"),
            Self::Style => write!(f, "Style"),
            Self::Security => write!(f, "Security")
        }
    }
}

/// Metadata about a check.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    /// Unique identifier (e.g., "LINT001")
    pub id:       &'static str,
    /// Human-readable name
    pub name:     &'static str,
    pub severity: Severity,
    pub category: RuleCategory
}

/// A single applicable check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub rule_id:   &'static str,
    pub rule_name: &'static str,
    /// Suggestion text returned by [`lint`](super::lint)
    pub message:   &'static str,
    pub severity:  Severity,
    pub category:  RuleCategory
}

/// Findings for one statement, in check order.
///
/// An empty `findings` list means the statement passed every check.
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    pub query:    String,
    pub findings: Vec<Finding>
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Suggestion strings; the fixed all-clear message when clean.
    pub fn messages(&self) -> Vec<String> {
        if self.is_clean() {
            return vec![super::LOOKS_GOOD.to_string()];
        }
        self.findings.iter().map(|f| f.message.to_string()).collect()
    }
}
