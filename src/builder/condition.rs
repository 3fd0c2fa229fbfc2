use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::{ToolError, input_format_error};

/// Scalar value usable in a WHERE condition or as a bound parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Text(String),
    Number(Number),
    Bool(bool),
    Null
}

impl fmt::Display for Literal {
    /// Render as SQL text.
    ///
    /// Text is wrapped in single quotes verbatim: embedded quotes are NOT
    /// escaped. Callers that forward untrusted text get exactly what they
    /// passed in, and the linter reports quote characters as an injection
    /// risk.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL")
        }
    }
}

impl TryFrom<&Value> for Literal {
    type Error = ToolError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => Ok(Self::Number(n.clone())),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Null => Ok(Self::Null),
            Value::Array(_) => Err(input_format_error("arrays are not valid literal values")),
            Value::Object(_) => Err(input_format_error("objects are not valid literal values"))
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Self::Number(i.into())
    }
}

/// Filter applied to one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Condition {
    /// Bare value, compared with `=`
    Scalar(Literal),
    /// Explicit operator, emitted verbatim
    Comparison { operator: String, value: Literal }
}

impl Condition {
    pub fn operator(&self) -> &str {
        match self {
            Self::Scalar(_) => "=",
            Self::Comparison {
                operator, ..
            } => operator
        }
    }

    pub fn value(&self) -> &Literal {
        match self {
            Self::Scalar(value)
            | Self::Comparison {
                value, ..
            } => value
        }
    }

    /// Render as `<column> <op> <value>`.
    pub fn render(&self, column: &str) -> String {
        format!("{} {} {}", column, self.operator(), self.value())
    }
}

impl TryFrom<&Value> for Condition {
    type Error = ToolError;

    /// A JSON object is a comparison: `{"operator": ">", "value": 5}`, with
    /// the operator defaulting to `=`. Any other value is a scalar.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Literal::try_from(value).map(Self::Scalar);
        };
        if let Some(unknown) = map.keys().find(|k| *k != "operator" && *k != "value") {
            return Err(input_format_error(format!(
                "unexpected key '{}' in condition object",
                unknown
            )));
        }
        let value = map
            .get("value")
            .ok_or_else(|| input_format_error("condition object requires a 'value' key"))?;
        let operator = match map.get("operator") {
            None => String::from("="),
            Some(Value::String(op)) if !op.trim().is_empty() => op.trim().to_string(),
            Some(other) => {
                return Err(input_format_error(format!(
                    "condition operator must be a non-empty string, got {}",
                    other
                )));
            }
        };
        Ok(Self::Comparison {
            operator,
            value: Literal::try_from(value)?
        })
    }
}

/// Ordered column -> condition map.
pub type Conditions = IndexMap<String, Condition>;

/// Decode conditions from a JSON object, keeping key order.
///
/// # Errors
///
/// Returns [`ToolError::InputFormat`] if `value` is not an object or any
/// entry is malformed.
pub fn conditions_from_value(value: &Value) -> Result<Conditions, ToolError> {
    let Value::Object(map) = value else {
        return Err(input_format_error("where_conditions must be a JSON object"));
    };
    map.iter()
        .map(|(column, raw)| {
            Condition::try_from(raw)
                .map(|c| (column.clone(), c))
                .map_err(|e| match e {
                    ToolError::InputFormat(msg) => {
                        input_format_error(format!("condition on '{}': {}", column, msg))
                    }
                    other => other
                })
        })
        .collect()
}

/// Decode conditions from their flat JSON text encoding.
///
/// # Errors
///
/// Returns [`ToolError::InputFormat`] if the text is not a JSON object of
/// valid conditions.
pub fn parse_conditions(text: &str) -> Result<Conditions, ToolError> {
    let raw: Value = serde_json::from_str(text)
        .map_err(|e| input_format_error(format!("where_conditions is not valid JSON: {}", e)))?;
    conditions_from_value(&raw)
}
