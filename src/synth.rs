//! Keyword-driven natural-language-to-SQL synthesis.
//!
//! A request is matched against an ordered list of [`SynthesisRule`]s. A rule
//! applies when one of its keywords occurs (case-insensitively, as a
//! substring) in the request; it then tries to resolve a target table and,
//! for aggregates, a column from the [`SchemaSnapshot`]. The first rule that
//! both applies and resolves produces the statement. A rule whose keyword
//! matched but whose lookup failed is skipped and evaluation continues with
//! the next rule.
//!
//! # Rule order
//!
//! | # | Keywords | Output |
//! |---|----------|--------|
//! | 1 | `count`, `how many` | `SELECT COUNT(*) as total_count FROM t` |
//! | 2 | `all`, `select` | `SELECT * FROM t` |
//! | 3 | `average`, `avg` | `SELECT AVG(c) as average_c FROM t` |
//! | 4 | `max`, `maximum` | `SELECT MAX(c) as max_c FROM t` |
//! | 5 | `min`, `minimum` | `SELECT MIN(c) as min_c FROM t` |
//! | 6 | `group by`, `grouped by` | `SELECT g, COUNT(*) as count FROM t GROUP BY g` |
//!
//! When nothing resolves, [`PLACEHOLDER`] is returned. The order is part of
//! the behavior: "count all orders" is a count, not a full select.
//!
//! # Example
//!
//! ```
//! use sql_tool_server::{
//!     schema::{ColumnDescriptor, SchemaSnapshot, TableSchema},
//!     synth::Synthesizer
//! };
//!
//! let snapshot: SchemaSnapshot = [TableSchema {
//!     table_name: "orders".into(),
//!     columns:    vec![ColumnDescriptor::new("total", "decimal(10,2)")]
//! }]
//! .into_iter()
//! .collect();
//!
//! let synth = Synthesizer::new();
//! assert_eq!(
//!     synth.synthesize("average total of orders", &snapshot),
//!     "SELECT AVG(total) as average_total FROM orders"
//! );
//! ```

mod rules;

pub use rules::SynthesisRule;

use crate::schema::SchemaSnapshot;

/// Returned when no rule resolves.
pub const PLACEHOLDER: &str = "-- Unable to generate SQL for this request. Please mention a table \
                               name and an operation (count, all, average, max, min, group by).";

/// Ordered rule list.
pub struct Synthesizer {
    rules: Vec<Box<dyn SynthesisRule>>
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer {
    /// Create a synthesizer with the built-in rules in their fixed order
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(rules::CountRows),
                Box::new(rules::SelectAll),
                Box::new(rules::Average),
                Box::new(rules::Maximum),
                Box::new(rules::Minimum),
                Box::new(rules::GroupCount),
            ]
        }
    }

    pub fn synthesize(&self, request: &str, snapshot: &SchemaSnapshot) -> String {
        let lowered = request.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.keywords().iter().any(|k| lowered.contains(k)))
            .find_map(|rule| rule.generate(&lowered, snapshot))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

/// [`Synthesizer::synthesize`] with the built-in rules.
pub fn synthesize(request: &str, snapshot: &SchemaSnapshot) -> String {
    Synthesizer::new().synthesize(request, snapshot)
}
