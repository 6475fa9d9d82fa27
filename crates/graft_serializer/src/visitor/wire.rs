use crate::error::Result;
use crate::value::Value;

/// Encodes a finished wire tree and decodes caller input into one.
///
/// `()` is the in-memory format: trees pass through unchanged.
pub trait WireFormat {
    fn encode(&self, tree: Value) -> Result<Value>;

    fn decode(&self, input: Value) -> Result<Value>;
}

impl WireFormat for () {
    #[inline]
    fn encode(&self, tree: Value) -> Result<Value> {
        Ok(tree)
    }

    #[inline]
    fn decode(&self, input: Value) -> Result<Value> {
        Ok(input)
    }
}
