use crate::schema::{ColumnDescriptor, SchemaSnapshot, TableSchema};

/// One synthesis strategy.
///
/// Rules are stateless. [`generate`](Self::generate) receives the
/// lower-cased request and returns `None` when the table or column lookup
/// fails, which hands the request to the next rule.
pub trait SynthesisRule: Send + Sync {
    /// Lower-case trigger substrings.
    fn keywords(&self) -> &'static [&'static str];

    fn generate(&self, request: &str, snapshot: &SchemaSnapshot) -> Option<String>;
}

/// First table, in snapshot order, whose name occurs in the request.
fn target_table<'s>(request: &str, snapshot: &'s SchemaSnapshot) -> Option<&'s TableSchema> {
    snapshot
        .tables()
        .find(|t| request.contains(&t.table_name.to_lowercase()))
}

fn first_column<'t>(
    table: &'t TableSchema,
    accept: impl Fn(&ColumnDescriptor) -> bool
) -> Option<&'t ColumnDescriptor> {
    table.columns.iter().find(|&c| accept(c))
}

/// `COUNT(*)` over the mentioned table
pub struct CountRows;

impl SynthesisRule for CountRows {
    fn keywords(&self) -> &'static [&'static str] {
        &["count", "how many"]
    }

    fn generate(&self, request: &str, snapshot: &SchemaSnapshot) -> Option<String> {
        let table = target_table(request, snapshot)?;
        Some(format!("SELECT COUNT(*) as total_count FROM {}", table.table_name))
    }
}

/// Every row of the mentioned table
pub struct SelectAll;

impl SynthesisRule for SelectAll {
    fn keywords(&self) -> &'static [&'static str] {
        &["all", "select"]
    }

    fn generate(&self, request: &str, snapshot: &SchemaSnapshot) -> Option<String> {
        let table = target_table(request, snapshot)?;
        Some(format!("SELECT * FROM {}", table.table_name))
    }
}

/// `AVG` of the first numeric column
pub struct Average;

impl SynthesisRule for Average {
    fn keywords(&self) -> &'static [&'static str] {
        &["average", "avg"]
    }

    fn generate(&self, request: &str, snapshot: &SchemaSnapshot) -> Option<String> {
        let table = target_table(request, snapshot)?;
        let column = first_column(table, ColumnDescriptor::is_numeric)?;
        Some(format!(
            "SELECT AVG({col}) as average_{col} FROM {table}",
            col = column.name,
            table = table.table_name
        ))
    }
}

fn extreme(function: &str, request: &str, snapshot: &SchemaSnapshot) -> Option<String> {
    let table = target_table(request, snapshot)?;
    let column = first_column(table, |c| c.is_numeric() || c.is_temporal())?;
    Some(format!(
        "SELECT {func}({col}) as {alias}_{col} FROM {table}",
        func = function,
        alias = function.to_lowercase(),
        col = column.name,
        table = table.table_name
    ))
}

/// `MAX` of the first numeric or temporal column
pub struct Maximum;

impl SynthesisRule for Maximum {
    fn keywords(&self) -> &'static [&'static str] {
        &["max", "maximum"]
    }

    fn generate(&self, request: &str, snapshot: &SchemaSnapshot) -> Option<String> {
        extreme("MAX", request, snapshot)
    }
}

/// `MIN` of the first numeric or temporal column
pub struct Minimum;

impl SynthesisRule for Minimum {
    fn keywords(&self) -> &'static [&'static str] {
        &["min", "minimum"]
    }

    fn generate(&self, request: &str, snapshot: &SchemaSnapshot) -> Option<String> {
        extreme("MIN", request, snapshot)
    }
}

/// Row count per value of a grouping column.
///
/// The grouping column is the first column named in the request, else the
/// first non-numeric column.
pub struct GroupCount;

impl SynthesisRule for GroupCount {
    fn keywords(&self) -> &'static [&'static str] {
        &["group by", "grouped by"]
    }

    fn generate(&self, request: &str, snapshot: &SchemaSnapshot) -> Option<String> {
        let table = target_table(request, snapshot)?;
        let column = first_column(table, |c| request.contains(c.name.to_lowercase().as_str()))
            .or_else(|| first_column(table, |c| !c.is_numeric()))?;
        Some(format!(
            "SELECT {col}, COUNT(*) as count FROM {table} GROUP BY {col}",
            col = column.name,
            table = table.table_name
        ))
    }
}
