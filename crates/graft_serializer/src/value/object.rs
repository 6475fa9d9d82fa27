use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use super::{Map, Value};

// -----------------------------------------------------------------------------
// Object

/// A class instance: a concrete class name plus named property slots.
///
/// The class name is fixed at construction; properties are interior-mutable
/// so graphs with back references can be built and filled in place.
pub struct Object {
    class: String,
    properties: RefCell<Map>,
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A shared handle to an [`Object`].
///
/// Cloning the handle shares the object. Equality is identity: two handles
/// are equal only when they point to the same object.
///
/// A graph with a cycle of `ObjectRef`s is not freed until one of its edges
/// is overwritten.
///
/// # Examples
///
/// ```
/// use graft_serializer::value::{ObjectRef, Value};
///
/// let parent = ObjectRef::new("Node");
/// let child = ObjectRef::new("Node");
/// child.set("parent", Value::Object(parent.clone()));
/// parent.set("child", Value::Object(child.clone()));
///
/// assert_eq!(child.get("parent"), Some(Value::Object(parent)));
/// ```
#[derive(Clone)]
pub struct ObjectRef(Rc<Object>);

impl ObjectRef {
    /// Creates an empty instance of `class`.
    pub fn new(class: impl Into<String>) -> Self {
        Self::with_properties(class, Map::new())
    }

    pub fn with_properties(class: impl Into<String>, properties: Map) -> Self {
        Self(Rc::new(Object {
            class: class.into(),
            properties: RefCell::new(properties),
        }))
    }

    /// The concrete class of the instance.
    #[inline]
    pub fn class_name(&self) -> &str {
        &self.0.class
    }

    /// An identity key, stable while the object is alive.
    #[inline]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns a copy of a property value.
    ///
    /// The borrow is released before returning, so the object may be
    /// mutated while the value is in use.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.properties.borrow().get(name).cloned()
    }

    /// Writes a property, keeping its position if it already exists.
    pub fn set(&self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.properties.borrow_mut().insert(name, value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.properties.borrow().contains_key(name)
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> Vec<String> {
        self.0.properties.borrow().keys().map(String::from).collect()
    }

    /// Borrows all properties.
    ///
    /// # Panics
    ///
    /// Panics if the properties are currently mutably borrowed.
    #[inline]
    pub fn properties(&self) -> Ref<'_, Map> {
        self.0.properties.borrow()
    }

    /// Mutably borrows all properties.
    ///
    /// # Panics
    ///
    /// Panics if the properties are currently borrowed.
    #[inline]
    pub fn properties_mut(&self) -> RefMut<'_, Map> {
        self.0.properties.borrow_mut()
    }
}

impl PartialEq for ObjectRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    // Properties are not printed: the graph may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.class_name(), self.id())
    }
}

// -----------------------------------------------------------------------------
// OpaqueRef

/// A host resource with no wire representation (a file handle, a socket).
///
/// The navigator refuses to serialize it.
#[derive(Clone)]
pub struct OpaqueRef {
    label: String,
    handle: Rc<dyn Any>,
}

impl OpaqueRef {
    pub fn new(label: impl Into<String>, handle: impl Any) -> Self {
        Self {
            label: label.into(),
            handle: Rc::new(handle),
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref()
    }
}

impl PartialEq for OpaqueRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for OpaqueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource({})", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::{ObjectRef, OpaqueRef};
    use crate::value::Value;

    #[test]
    fn identity_equality() {
        let a = ObjectRef::new("Money");
        let b = ObjectRef::new("Money");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn cyclic_debug_terminates() {
        let node = ObjectRef::new("Node");
        node.set("next", Value::Object(node.clone()));
        let text = alloc::format!("{node:?}");
        assert!(text.starts_with("Node@"));
        // Break the cycle so the test does not leak.
        node.set("next", Value::Null);
    }

    #[test]
    fn opaque_downcast() {
        let handle = OpaqueRef::new("counter", 7_u32);
        assert_eq!(handle.downcast_ref::<u32>(), Some(&7));
        assert_eq!(handle.downcast_ref::<i32>(), None);
        assert_eq!(handle.label(), "counter");
    }
}
