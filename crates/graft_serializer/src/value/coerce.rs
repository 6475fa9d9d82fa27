use alloc::string::{String, ToString};

use super::Value;
use crate::error::{Error, Result};

// -----------------------------------------------------------------------------
// Scalar coercion
//
// Deserialization is lenient: wire formats carry numbers as strings and the
// other way around. Containers never coerce to scalars.

impl Value {
    fn invalid(&self, expected: &'static str) -> Error {
        Error::InvalidValue {
            expected,
            found: String::from(self.kind_name()),
        }
    }

    /// Converts to an integer.
    ///
    /// Doubles are truncated; booleans become `0`/`1`; strings are parsed
    /// as integers, then as doubles; `null` is `0`.
    pub fn coerce_integer(&self) -> Result<i64> {
        match self {
            Self::Null => Ok(0),
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Integer(i) => Ok(*i),
            Self::Double(d) => Ok(*d as i64),
            Self::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .or_else(|_| s.parse::<f64>().map(|d| d as i64))
                    .map_err(|_| Error::InvalidValue {
                        expected: "integer",
                        found: alloc::format!("string `{s}`"),
                    })
            }
            _ => Err(self.invalid("integer")),
        }
    }

    /// Converts to a double.
    pub fn coerce_double(&self) -> Result<f64> {
        match self {
            Self::Null => Ok(0.0),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Integer(i) => Ok(*i as f64),
            Self::Double(d) => Ok(*d),
            Self::String(s) => s.trim().parse::<f64>().map_err(|_| Error::InvalidValue {
                expected: "double",
                found: alloc::format!("string `{s}`"),
            }),
            _ => Err(self.invalid("double")),
        }
    }

    /// Converts to a boolean.
    ///
    /// `""`, `"0"` and `"false"` are false, other strings are true; numbers
    /// are true when non-zero.
    pub fn coerce_bool(&self) -> Result<bool> {
        match self {
            Self::Null => Ok(false),
            Self::Bool(b) => Ok(*b),
            Self::Integer(i) => Ok(*i != 0),
            Self::Double(d) => Ok(*d != 0.0),
            Self::String(s) => Ok(!matches!(s.as_str(), "" | "0" | "false")),
            _ => Err(self.invalid("boolean")),
        }
    }

    /// Converts to a string.
    pub fn coerce_string(&self) -> Result<String> {
        match self {
            Self::Null => Ok(String::new()),
            Self::Bool(b) => Ok(b.to_string()),
            Self::Integer(i) => Ok(i.to_string()),
            Self::Double(d) => Ok(d.to_string()),
            Self::String(s) => Ok(s.clone()),
            _ => Err(self.invalid("string")),
        }
    }
}
