use crate::mapping::MappingError;
use std::fmt;
use std::fmt::Display;

/// Declared type of a record field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ValueType {
    /// Accepts any value as-is
    #[default]
    Any,
    /// Text values
    Text,
    /// 64-bit signed integers. Text such as "3000000000" parses here even
    /// though it is outside the 32-bit range; only values beyond `i64` fall
    /// back to the original text.
    Integer,
}

impl ValueType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::Any => "any",
            ValueType::Text => "text",
            ValueType::Integer => "integer",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell value on its way into a record field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Value {
    /// No value
    #[default]
    Null,
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value already has the representation `kind` asks for.
    pub fn conforms_to(&self, kind: ValueType) -> bool {
        match (self, kind) {
            (_, ValueType::Any) => true,
            (Value::Text(_), ValueType::Text) => true,
            (Value::Integer(_), ValueType::Integer) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(integer) => Some(*integer),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(text) => f.write_str(text),
            Value::Integer(integer) => write!(f, "{integer}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Value::Integer(integer)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Coerces `value` towards `kind`, keeping the original value when it can't.
///
/// Only integer targets are parsed; any other mismatch, and any text that
/// doesn't parse, is returned untouched. Idempotent.
pub fn convert(value: Value, kind: ValueType) -> Value {
    if value.is_null() || value.conforms_to(kind) {
        return value;
    }
    match (value, kind) {
        (Value::Text(text), ValueType::Integer) => match parse_integer(&text) {
            Some(integer) => Value::Integer(integer),
            None => Value::Text(text),
        },
        (value, _) => value,
    }
}

/// Like [`convert`], but fails when the result doesn't conform to `kind`.
pub fn try_convert(field: &str, value: Value, kind: ValueType) -> Result<Value, MappingError> {
    let converted = convert(value, kind);
    if converted.is_null() || converted.conforms_to(kind) {
        Ok(converted)
    } else {
        Err(MappingError::ConversionError {
            field: field.to_owned(),
            value: converted.to_string(),
            kind,
        })
    }
}

/// Surrounding whitespace and a leading sign are accepted.
fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}
