use std::{borrow::Cow, fmt::Display};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc};
use indexmap::IndexMap;
use serde_json::{Number, Value};
use tracing::warn;

use crate::error::ToolError;

/// One result row, keyed by column label in result order.
pub type Row = IndexMap<String, SqlValue>;

/// Cell value decoded from the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Exact decimal text, never rounded through a float
    Decimal(String),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Time(NaiveTime),
    Json(Value)
}

impl SqlValue {
    /// Text view of textual cells; binary cells are decoded lossily.
    ///
    /// Metadata columns of `information_schema` come back as either depending
    /// on server version and collation.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) | Self::Decimal(s) => Some(Cow::Borrowed(s)),
            Self::Bytes(b) => Some(String::from_utf8_lossy(b)),
            _ => None
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert into JSON, rendering temporal values as ISO-8601 strings.
    pub fn into_json(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Int(i) => Value::Number(i.into()),
            Self::UInt(u) => Value::Number(u.into()),
            Self::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            Self::Decimal(s) | Self::Text(s) => Value::String(s),
            Self::Bytes(b) => Value::String(String::from_utf8_lossy(&b).into_owned()),
            Self::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => Value::String(format_datetime(&dt)),
            Self::Timestamp(ts) => {
                Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Self::Time(t) => Value::String(t.format("%H:%M:%S%.f").to_string()),
            Self::Json(v) => v
        }
    }
}

/// Settles one cell from its typed decode and the text fallback.
///
/// `typed` is `None` when the column type has no dedicated decoder. A SQL
/// NULL stays [`SqlValue::Null`]. A failed typed decode is logged and retried
/// through `fallback`; a cell neither accepts is an execution error, never a
/// silent `null`.
///
/// # Errors
///
/// Returns [`ToolError::Execution`] when the fallback decode fails too.
pub fn settle_cell<E: Display>(
    column: &str,
    typed: Option<Result<Option<SqlValue>, E>>,
    fallback: impl FnOnce() -> Result<Option<SqlValue>, E>
) -> Result<SqlValue, ToolError> {
    match typed {
        Some(Ok(value)) => return Ok(SqlValue::from(value)),
        Some(Err(e)) => warn!(column, error = %e, "typed decode failed, reading as text"),
        None => {}
    }
    fallback()
        .map(SqlValue::from)
        .map_err(|e| ToolError::Execution(format!("cannot decode column '{}': {}", column, e)))
}

fn format_datetime(dt: &NaiveDateTime) -> String {
    // fractional seconds only when present
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}
