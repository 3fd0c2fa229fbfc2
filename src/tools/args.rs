//! Flat tool argument decoding.
//!
//! Every accessor fails with [`ToolError::InputFormat`], so a malformed call
//! is rejected before the database is touched.

use serde_json::{Map, Value};

use crate::{
    builder::{ColumnVec, Conditions, Literal, conditions_from_value, parse_columns, parse_conditions},
    error::{ToolError, input_format_error}
};

/// Borrowed view of a `tools/call` arguments object.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    map: Option<&'a Map<String, Value>>
}

impl<'a> Args<'a> {
    /// Accepts an object, or `null` for a call without arguments.
    pub fn new(value: &'a Value) -> Result<Self, ToolError> {
        match value {
            Value::Object(map) => Ok(Self {
                map: Some(map)
            }),
            Value::Null => Ok(Self {
                map: None
            }),
            _ => Err(input_format_error("arguments must be a JSON object"))
        }
    }

    /// Present and non-null value of `key`.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key)).filter(|v| !v.is_null())
    }

    pub fn required_str(&self, key: &str) -> Result<&'a str, ToolError> {
        match self.optional_str(key)? {
            Some(s) if !s.trim().is_empty() => Ok(s),
            Some(_) => Err(input_format_error(format!("argument '{}' must not be empty", key))),
            None => Err(input_format_error(format!("missing required argument '{}'", key)))
        }
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&'a str>, ToolError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(input_format_error(format!("argument '{}' must be a string", key)))
        }
    }

    /// Boolean flag, `false` when absent.
    pub fn flag(&self, key: &str) -> Result<bool, ToolError> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(input_format_error(format!("argument '{}' must be a boolean", key)))
        }
    }

    pub fn optional_u64(&self, key: &str) -> Result<Option<u64>, ToolError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                input_format_error(format!("argument '{}' must be a non-negative integer", key))
            }),
            Some(_) => Err(input_format_error(format!(
                "argument '{}' must be a non-negative integer",
                key
            )))
        }
    }

    /// Comma-separated column list.
    pub fn columns(&self, key: &str) -> Result<ColumnVec, ToolError> {
        match self.optional_str(key)? {
            Some(text) => parse_columns(text),
            None => Ok(ColumnVec::new())
        }
    }

    /// Condition object, either inline or as JSON text.
    pub fn conditions(&self, key: &str) -> Result<Conditions, ToolError> {
        match self.get(key) {
            None => Ok(Conditions::new()),
            Some(Value::String(text)) if text.trim().is_empty() => Ok(Conditions::new()),
            Some(Value::String(text)) => parse_conditions(text),
            Some(value) => conditions_from_value(value)
        }
    }

    /// Positional parameters, either an inline array or its JSON text.
    pub fn params(&self, key: &str) -> Result<Vec<Literal>, ToolError> {
        let parsed;
        let value = match self.get(key) {
            None => return Ok(Vec::new()),
            Some(Value::String(text)) => {
                parsed = serde_json::from_str::<Value>(text).map_err(|e| {
                    input_format_error(format!("argument '{}' is not valid JSON: {}", key, e))
                })?;
                &parsed
            }
            Some(value) => value
        };
        let Value::Array(items) = value else {
            return Err(input_format_error(format!("argument '{}' must be a JSON array", key)));
        };
        items.iter().map(Literal::try_from).collect()
    }
}
