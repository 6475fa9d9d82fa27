use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{Visitor, WireFormat};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::metadata::{ClassMetadata, PropertyMetadata};
use crate::naming::PropertyNamingStrategy;
use crate::navigator::GraphNavigator;
use crate::types::TypeDescriptor;
use crate::value::{Map, Value};

// -----------------------------------------------------------------------------
// SerializationVisitor

/// Flattens an object graph into a tree of lists, maps and scalars.
///
/// Each class-typed node becomes a [`Map`] keyed by the naming strategy. If
/// the class carries a [`Discriminator`], its field is written first.
/// Properties and array elements that visit to `null` are omitted unless the
/// context asks to serialize nulls.
///
/// The finished tree is handed to the [`WireFormat`] `F`.
///
/// [`Discriminator`]: crate::metadata::Discriminator
pub struct SerializationVisitor<F: WireFormat = ()> {
    naming: Arc<dyn PropertyNamingStrategy>,
    format: F,
    stack: Vec<Map>,
}

impl SerializationVisitor<()> {
    /// Creates a visitor producing an in-memory tree.
    #[inline]
    pub fn new(naming: Arc<dyn PropertyNamingStrategy>) -> Self {
        Self::with_format(naming, ())
    }
}

impl<F: WireFormat> SerializationVisitor<F> {
    #[inline]
    pub fn with_format(naming: Arc<dyn PropertyNamingStrategy>, format: F) -> Self {
        Self {
            naming,
            format,
            stack: Vec::new(),
        }
    }

    fn current_mut(&mut self) -> Result<&mut Map> {
        self.stack
            .last_mut()
            .ok_or_else(|| Error::custom("property visited outside of an object"))
    }

    #[inline]
    fn keep(value: &Value, context: &Context<'_>) -> bool {
        !value.is_null() || context.should_serialize_null()
    }
}

impl<F: WireFormat> Visitor for SerializationVisitor<F> {
    fn set_navigator(&mut self, _navigator: &GraphNavigator) {
        self.stack.clear();
    }

    #[inline]
    fn visit_null(&mut self, _: &Value, _: &TypeDescriptor, _: &mut Context<'_>) -> Result<Value> {
        Ok(Value::Null)
    }

    #[inline]
    fn visit_string(&mut self, data: &Value, _: &TypeDescriptor, _: &mut Context<'_>) -> Result<Value> {
        data.coerce_string().map(Value::String)
    }

    #[inline]
    fn visit_integer(&mut self, data: &Value, _: &TypeDescriptor, _: &mut Context<'_>) -> Result<Value> {
        data.coerce_integer().map(Value::Integer)
    }

    #[inline]
    fn visit_boolean(&mut self, data: &Value, _: &TypeDescriptor, _: &mut Context<'_>) -> Result<Value> {
        data.coerce_bool().map(Value::Bool)
    }

    #[inline]
    fn visit_double(&mut self, data: &Value, _: &TypeDescriptor, _: &mut Context<'_>) -> Result<Value> {
        data.coerce_double().map(Value::Double)
    }

    fn visit_array(&mut self, data: &Value, ty: &TypeDescriptor, context: &mut Context<'_>) -> Result<Value> {
        // Lists use their only parameter, maps their value parameter.
        let element = match ty.params() {
            [] => None,
            [element] | [_, element] => Some(element),
            _ => return Err(Error::TooManyArrayParams(ty.clone())),
        };
        let is_list = ty.params().len() == 1;

        match data {
            Value::List(items) if ty.params().len() < 2 => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    let value = context.accept(self, item, element)?;
                    if Self::keep(&value, context) {
                        out.push(value);
                    }
                }
                Ok(Value::List(out))
            }
            Value::List(items) => {
                let mut out = Map::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let value = context.accept(self, item, element)?;
                    if Self::keep(&value, context) {
                        out.insert(index.to_string(), value);
                    }
                }
                Ok(Value::Map(out))
            }
            Value::Map(map) if is_list => {
                let mut out = Vec::with_capacity(map.len());
                for item in map.values() {
                    let value = context.accept(self, item, element)?;
                    if Self::keep(&value, context) {
                        out.push(value);
                    }
                }
                Ok(Value::List(out))
            }
            Value::Map(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map.iter() {
                    let value = context.accept(self, item, element)?;
                    if Self::keep(&value, context) {
                        out.insert(key, value);
                    }
                }
                Ok(Value::Map(out))
            }
            other => Err(Error::InvalidValue {
                expected: "array",
                found: String::from(other.kind_name()),
            }),
        }
    }

    fn start_visiting_object(
        &mut self,
        metadata: &ClassMetadata,
        _object: &Value,
        _ty: &TypeDescriptor,
        _context: &mut Context<'_>,
    ) -> Result<()> {
        let mut map = Map::with_capacity(metadata.properties().len() + 1);
        if let Some(discriminator) = metadata.discriminator()
            && let Some(value) = discriminator.value_for(metadata.name())
        {
            map.insert(discriminator.field_name(), Value::from(value));
        }
        self.stack.push(map);
        Ok(())
    }

    fn visit_property(
        &mut self,
        property: &PropertyMetadata,
        data: &Value,
        context: &mut Context<'_>,
    ) -> Result<()> {
        let value = data.field(property.name()).unwrap_or_default();
        if !Self::keep(&value, context) {
            return Ok(());
        }

        let value = context.accept(self, &value, property.ty())?;
        if !Self::keep(&value, context) {
            return Ok(());
        }

        let key = self.naming.translate_name(property);
        self.current_mut()?.insert(key, value);
        Ok(())
    }

    fn end_visiting_object(
        &mut self,
        _metadata: &ClassMetadata,
        _data: &Value,
        _ty: &TypeDescriptor,
        _context: &mut Context<'_>,
    ) -> Result<Value> {
        self.stack
            .pop()
            .map(Value::Map)
            .ok_or_else(|| Error::custom("object closed without being opened"))
    }

    #[inline]
    fn get_result(&mut self, root: Value) -> Result<Value> {
        self.format.encode(root)
    }
}
