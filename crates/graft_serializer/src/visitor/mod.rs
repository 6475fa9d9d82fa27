//! Format visitors: the per-node operations the navigator drives.
//!
//! - [`Visitor`]: the contract.
//! - [`SerializationVisitor`] / [`DeserializationVisitor`]: generic
//!   implementations building or reading [`Value`] trees, parameterised by a
//!   [`WireFormat`] that encodes the finished tree.
//! - [`JsonSerializationVisitor`] / [`JsonDeserializationVisitor`]: JSON text
//!   (feature `json`).
//!
//! [`Value`]: crate::value::Value

// -----------------------------------------------------------------------------
// Modules

mod deserialization;
mod serialization;
mod wire;

#[cfg(feature = "json")]
mod json;

// -----------------------------------------------------------------------------
// Exports

pub use deserialization::DeserializationVisitor;
pub use serialization::SerializationVisitor;
pub use wire::WireFormat;

#[cfg(feature = "json")]
pub use json::{Json, JsonDeserializationVisitor, JsonSerializationVisitor};

use crate::context::Context;
use crate::error::Result;
use crate::metadata::{ClassMetadata, PropertyMetadata};
use crate::navigator::GraphNavigator;
use crate::types::TypeDescriptor;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Visitor

/// Format-specific operations invoked by the navigator for each node.
///
/// Every `visit_*` method returns the node's result: the wire tree when
/// serializing, the rebuilt value when deserializing. Composite nodes
/// recurse through [`Context::accept`].
///
/// A visitor is stateful and serves one call at a time;
/// [`set_navigator`](Self::set_navigator) resets it.
pub trait Visitor {
    /// Resets per-call state before a call starts.
    fn set_navigator(&mut self, navigator: &GraphNavigator);

    /// Turns the caller's input into the root value to traverse.
    ///
    /// Deserialization visitors decode wire text here.
    fn prepare(&mut self, data: Value) -> Result<Value> {
        Ok(data)
    }

    fn visit_null(&mut self, data: &Value, ty: &TypeDescriptor, context: &mut Context<'_>) -> Result<Value>;

    fn visit_string(&mut self, data: &Value, ty: &TypeDescriptor, context: &mut Context<'_>) -> Result<Value>;

    fn visit_integer(&mut self, data: &Value, ty: &TypeDescriptor, context: &mut Context<'_>) -> Result<Value>;

    fn visit_boolean(&mut self, data: &Value, ty: &TypeDescriptor, context: &mut Context<'_>) -> Result<Value>;

    fn visit_double(&mut self, data: &Value, ty: &TypeDescriptor, context: &mut Context<'_>) -> Result<Value>;

    /// Visits a list or map. See the [crate documentation](crate#type-strings)
    /// for how the number of type parameters selects list or map handling.
    fn visit_array(&mut self, data: &Value, ty: &TypeDescriptor, context: &mut Context<'_>) -> Result<Value>;

    /// Opens a class-typed node. `object` is the source object when
    /// serializing and the freshly constructed instance when deserializing.
    fn start_visiting_object(
        &mut self,
        metadata: &ClassMetadata,
        object: &Value,
        ty: &TypeDescriptor,
        context: &mut Context<'_>,
    ) -> Result<()>;

    /// Visits one property. `data` is the source object when serializing and
    /// the raw input of the node when deserializing.
    fn visit_property(
        &mut self,
        property: &PropertyMetadata,
        data: &Value,
        context: &mut Context<'_>,
    ) -> Result<()>;

    /// Closes the node opened by the matching
    /// [`start_visiting_object`](Self::start_visiting_object) and returns its result.
    fn end_visiting_object(
        &mut self,
        metadata: &ClassMetadata,
        data: &Value,
        ty: &TypeDescriptor,
        context: &mut Context<'_>,
    ) -> Result<Value>;

    /// Finishes the call. `root` is what the navigator returned for the root node.
    fn get_result(&mut self, root: Value) -> Result<Value>;
}
