//! Instance creation during deserialization.

use crate::context::Context;
use crate::error::Result;
use crate::metadata::ClassMetadata;
use crate::types::TypeDescriptor;
use crate::value::{ObjectRef, Value};
use crate::visitor::Visitor;

/// Creates the instance a deserialized node is written into.
///
/// The navigator calls it once per class-typed node, after discriminator
/// resolution, with the raw input of the node.
pub trait ObjectConstructor: Send + Sync {
    fn construct(
        &self,
        visitor: &mut dyn Visitor,
        metadata: &ClassMetadata,
        data: &Value,
        ty: &TypeDescriptor,
        context: &mut Context<'_>,
    ) -> Result<Value>;
}

/// Creates an empty [`Object`](crate::value::Object) of the metadata's class.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultObjectConstructor;

impl ObjectConstructor for DefaultObjectConstructor {
    #[inline]
    fn construct(
        &self,
        _visitor: &mut dyn Visitor,
        metadata: &ClassMetadata,
        _data: &Value,
        _ty: &TypeDescriptor,
        _context: &mut Context<'_>,
    ) -> Result<Value> {
        Ok(Value::Object(ObjectRef::new(metadata.name())))
    }
}
