use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use super::{Discriminator, PropertyMetadata};
use crate::context::Direction;
use crate::event::Phase;
use crate::value::Value;

/// A lifecycle hook invoked around the visit of a class instance.
///
/// Pre hooks receive the source object (serialization) or the raw input
/// (deserialization); post hooks receive the source object or the
/// constructed result.
pub type LifecycleCallback = Arc<dyn Fn(&Value) + Send + Sync>;

// -----------------------------------------------------------------------------
// ClassMetadata

/// Read-only serialization metadata of one class.
///
/// # Examples
///
/// ```
/// use graft_serializer::metadata::{ClassMetadata, PropertyMetadata};
/// use graft_serializer::types::TypeDescriptor;
///
/// let money = ClassMetadata::new("Money")
///     .with_property(PropertyMetadata::new("amount").with_type(TypeDescriptor::parse("integer").unwrap()))
///     .with_property(PropertyMetadata::new("currency").with_type(TypeDescriptor::parse("string").unwrap()));
///
/// assert_eq!(money.properties().len(), 2);
/// assert_eq!(money.property("amount").unwrap().class(), "Money");
/// ```
#[derive(Clone)]
pub struct ClassMetadata {
    name: String,
    parent: Option<String>,
    interfaces: Vec<String>,
    properties: Vec<Arc<PropertyMetadata>>,
    discriminator: Option<Discriminator>,
    callbacks: Vec<(Phase, Direction, LifecycleCallback)>,
}

impl ClassMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
            discriminator: None,
            callbacks: Vec::new(),
        }
    }

    #[inline]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[inline]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Appends a property declared by this class.
    ///
    /// A property with the same name replaces the earlier one in place.
    pub fn with_property(mut self, mut property: PropertyMetadata) -> Self {
        property.set_class(&self.name);
        self.insert_property(Arc::new(property));
        self
    }

    #[inline]
    pub fn with_discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }

    /// Registers a lifecycle hook. Hooks of one phase and direction run in
    /// registration order.
    pub fn with_callback(
        mut self,
        phase: Phase,
        direction: Direction,
        callback: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.push((phase, direction, Arc::new(callback)));
        self
    }

    fn insert_property(&mut self, property: Arc<PropertyMetadata>) {
        match self.properties.iter_mut().find(|p| p.name() == property.name()) {
            Some(slot) => *slot = property,
            None => self.properties.push(property),
        }
    }

    /// Puts the properties and discriminator of `parent` in front of this
    /// class's own declarations.
    pub(super) fn inherit(&mut self, parent: &ClassMetadata) {
        let own = core::mem::take(&mut self.properties);
        self.properties = parent.properties.clone();
        for property in own {
            self.insert_property(property);
        }
        if self.discriminator.is_none() {
            self.discriminator = parent.discriminator.clone();
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[inline]
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Properties in declaration order, inherited ones first.
    #[inline]
    pub fn properties(&self) -> &[Arc<PropertyMetadata>] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Arc<PropertyMetadata>> {
        self.properties.iter().find(|p| p.name() == name)
    }

    #[inline]
    pub fn discriminator(&self) -> Option<&Discriminator> {
        self.discriminator.as_ref()
    }

    /// Hooks of one phase and direction, in registration order.
    pub fn callbacks(
        &self,
        phase: Phase,
        direction: Direction,
    ) -> impl Iterator<Item = &LifecycleCallback> {
        self.callbacks
            .iter()
            .filter(move |(p, d, _)| *p == phase && *d == direction)
            .map(|(_, _, callback)| callback)
    }
}

impl fmt::Debug for ClassMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMetadata")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("interfaces", &self.interfaces)
            .field("properties", &self.properties)
            .field("discriminator", &self.discriminator)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::ClassMetadata;
    use crate::context::Direction;
    use crate::event::Phase;
    use crate::metadata::PropertyMetadata;

    #[test]
    fn redeclared_property_keeps_position() {
        let metadata = ClassMetadata::new("User")
            .with_property(PropertyMetadata::new("id"))
            .with_property(PropertyMetadata::new("name"))
            .with_property(PropertyMetadata::new("id").read_only());

        let names: Vec<_> = metadata.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["id", "name"]);
        assert!(metadata.property("id").unwrap().is_read_only());
    }

    #[test]
    fn callbacks_filter_by_phase_and_direction() {
        let metadata = ClassMetadata::new("User")
            .with_callback(Phase::Pre, Direction::Serialization, |_| {})
            .with_callback(Phase::Post, Direction::Serialization, |_| {})
            .with_callback(Phase::Pre, Direction::Serialization, |_| {});

        assert_eq!(metadata.callbacks(Phase::Pre, Direction::Serialization).count(), 2);
        assert_eq!(metadata.callbacks(Phase::Pre, Direction::Deserialization).count(), 0);
    }
}
