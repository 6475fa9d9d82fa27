use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{Visitor, WireFormat};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::metadata::{ClassMetadata, PropertyMetadata};
use crate::naming::PropertyNamingStrategy;
use crate::navigator::GraphNavigator;
use crate::types::TypeDescriptor;
use crate::value::{Map, ObjectRef, Value};

// -----------------------------------------------------------------------------
// DeserializationVisitor

/// Rebuilds an object graph from a tree of lists, maps and scalars.
///
/// Scalars are coerced leniently to the declared kind. Properties are read
/// under the key given by the naming strategy; absent keys leave the
/// property unset and explicit `null`s are written as `null`.
///
/// Caller input is decoded by the [`WireFormat`] `F` first.
pub struct DeserializationVisitor<F: WireFormat = ()> {
    naming: Arc<dyn PropertyNamingStrategy>,
    format: F,
    stack: Vec<ObjectRef>,
}

impl DeserializationVisitor<()> {
    /// Creates a visitor reading an in-memory tree.
    #[inline]
    pub fn new(naming: Arc<dyn PropertyNamingStrategy>) -> Self {
        Self::with_format(naming, ())
    }
}

impl<F: WireFormat> DeserializationVisitor<F> {
    #[inline]
    pub fn with_format(naming: Arc<dyn PropertyNamingStrategy>, format: F) -> Self {
        Self {
            naming,
            format,
            stack: Vec::new(),
        }
    }

    fn current(&self) -> Result<&ObjectRef> {
        self.stack
            .last()
            .ok_or_else(|| Error::custom("property visited outside of an object"))
    }
}

#[inline]
fn expected_array(found: &Value) -> Error {
    Error::InvalidValue {
        expected: "array",
        found: String::from(found.kind_name()),
    }
}

impl<F: WireFormat> Visitor for DeserializationVisitor<F> {
    fn set_navigator(&mut self, _navigator: &GraphNavigator) {
        self.stack.clear();
    }

    #[inline]
    fn prepare(&mut self, data: Value) -> Result<Value> {
        self.format.decode(data)
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
        match ty.params() {
            // Untyped arrays pass through.
            [] => match data {
                Value::List(_) | Value::Map(_) => Ok(data.clone()),
                other => Err(expected_array(other)),
            },
            [element] => {
                let items: Vec<&Value> = match data {
                    Value::List(items) => items.iter().collect(),
                    Value::Map(map) => map.values().collect(),
                    other => return Err(expected_array(other)),
                };
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(context.accept(self, item, Some(element))?);
                }
                Ok(Value::List(out))
            }
            [key_ty, value_ty] => {
                let entries: Vec<(Value, &Value)> = match data {
                    Value::Map(map) => map.iter().map(|(k, v)| (Value::from(k), v)).collect(),
                    Value::List(items) => items
                        .iter()
                        .enumerate()
                        .map(|(i, v)| (Value::Integer(i as i64), v))
                        .collect(),
                    other => return Err(expected_array(other)),
                };
                let mut out = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    let key = context.accept(self, &key, Some(key_ty))?.coerce_string()?;
                    let value = context.accept(self, item, Some(value_ty))?;
                    out.insert(key, value);
                }
                Ok(Value::Map(out))
            }
            _ => Err(Error::TooManyArrayParams(ty.clone())),
        }
    }

    fn start_visiting_object(
        &mut self,
        _metadata: &ClassMetadata,
        object: &Value,
        _ty: &TypeDescriptor,
        _context: &mut Context<'_>,
    ) -> Result<()> {
        let Value::Object(object) = object else {
            return Err(Error::InvalidValue {
                expected: "object",
                found: String::from(object.kind_name()),
            });
        };
        self.stack.push(object.clone());
        Ok(())
    }

    fn visit_property(
        &mut self,
        property: &PropertyMetadata,
        data: &Value,
        context: &mut Context<'_>,
    ) -> Result<()> {
        let name = self.naming.translate_name(property);
        let Some(raw) = data.field(&name) else {
            return Ok(());
        };

        let Some(ty) = property.ty() else {
            return Err(Error::MissingPropertyType {
                class: String::from(property.class()),
                property: String::from(property.name()),
            });
        };

        let value = if raw.is_null() {
            Value::Null
        } else {
            context.accept(self, &raw, Some(ty))?
        };

        self.current()?.set(property.name(), value);
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
            .map(Value::Object)
            .ok_or_else(|| Error::custom("object closed without being opened"))
    }

    /// The navigator's root result: the constructed root object, or the
    /// rebuilt collection or scalar.
    #[inline]
    fn get_result(&mut self, root: Value) -> Result<Value> {
        Ok(root)
    }
}
