//! Cell value normalization for Brazilian numeric formatting.
//!
//! `.` is the thousands separator and `,` the decimal separator, so
//! `"1.234.567,89"` is `1234567.89`. No other locale is recognized.

use serde::Serialize;
use std::fmt;

/// A typed table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Outcome of normalizing one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub value: Value,
    /// Numeric-looking text that failed to parse and was replaced by `0.0`
    pub degraded: bool,
}

impl Value {
    /// Normalize a cell's text, discarding the degradation flag
    pub fn from_cell(text: &str) -> Self {
        normalize(text).value
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// True when the text holds only digits and separators, and at least one digit
fn looks_numeric(text: &str) -> bool {
    let mut digits = 0usize;
    for c in text.chars() {
        match c {
            '.' | ',' => {}
            '0'..='9' => digits += 1,
            _ => return false,
        }
    }
    digits > 0
}

/// Decide the type of a cell's text.
pub fn normalize(text: &str) -> Normalized {
    let text = text.trim();

    if !looks_numeric(text) {
        return Normalized {
            value: Value::Text(text.to_string()),
            degraded: false,
        };
    }

    let cleaned = text.replace('.', "").replace(',', ".");

    let parsed = if cleaned.contains('.') {
        cleaned.parse::<f64>().ok().map(Value::Float)
    } else {
        cleaned.parse::<i64>().ok().map(Value::Integer)
    };

    match parsed {
        Some(value) => Normalized {
            value,
            degraded: false,
        },
        None => Normalized {
            value: Value::Float(0.0),
            degraded: true,
        },
    }
}
