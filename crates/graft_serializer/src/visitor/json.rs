use alloc::string::String;

use super::{DeserializationVisitor, SerializationVisitor, WireFormat};
use crate::error::{Error, Result};
use crate::value::Value;

/// JSON text through `serde_json`.
///
/// Encoding yields a [`Value::String`] holding the document; decoding expects
/// one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Json {
    pretty: bool,
}

impl Json {
    #[inline]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    #[inline]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl WireFormat for Json {
    fn encode(&self, tree: Value) -> Result<Value> {
        let text = if self.pretty {
            serde_json::to_string_pretty(&tree)?
        } else {
            serde_json::to_string(&tree)?
        };
        Ok(Value::String(text))
    }

    fn decode(&self, input: Value) -> Result<Value> {
        match input {
            Value::String(text) => Ok(serde_json::from_str(&text)?),
            other => Err(Error::InvalidValue {
                expected: "JSON text",
                found: String::from(other.kind_name()),
            }),
        }
    }
}

/// Writes JSON text.
pub type JsonSerializationVisitor = SerializationVisitor<Json>;

/// Reads JSON text.
pub type JsonDeserializationVisitor = DeserializationVisitor<Json>;
