//! The dynamic object graph walked by the navigator.
//!
//! A [`Value`] is one node: a scalar, a list, an ordered [`Map`], a shared
//! class instance ([`ObjectRef`]) or an unserializable host resource
//! ([`OpaqueRef`]). Objects are reference counted, so a graph may contain
//! back references and cycles.

// -----------------------------------------------------------------------------
// Modules

mod coerce;
mod map;
mod object;
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use map::Map;
pub use object::{Object, ObjectRef, OpaqueRef};

use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Value

/// One node of an object graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    Object(ObjectRef),
    Opaque(OpaqueRef),
}

impl Value {
    /// A short name of the variant, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
            Self::Opaque(_) => "resource",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Reads a named field from a keyed map or from an object's property.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Self::Map(map) => map.get(name).cloned(),
            Self::Object(object) => object.get(name),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Map> for Value {
    #[inline]
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<ObjectRef> for Value {
    #[inline]
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::{Map, ObjectRef, Value};

    #[test]
    fn field_reads_maps_and_objects() {
        let mut map = Map::new();
        map.insert("type", Value::from("dog"));
        assert_eq!(Value::Map(map).field("type"), Some(Value::from("dog")));

        let object = ObjectRef::new("Dog");
        object.set("type", Value::from("dog"));
        assert_eq!(Value::Object(object).field("type"), Some(Value::from("dog")));

        assert_eq!(Value::from("dog").field("type"), None);
    }

    #[test]
    fn option_into_value() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Integer(3));
    }
}
