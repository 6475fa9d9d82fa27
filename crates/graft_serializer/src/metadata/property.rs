use alloc::string::String;

use crate::types::TypeDescriptor;

/// Serialization metadata of one property, scoped to its declaring class.
///
/// # Examples
///
/// ```
/// use graft_serializer::metadata::PropertyMetadata;
/// use graft_serializer::types::TypeDescriptor;
///
/// let id = PropertyMetadata::new("id")
///     .with_type(TypeDescriptor::parse("integer").unwrap())
///     .with_serialized_name("ID")
///     .read_only();
///
/// assert_eq!(id.name(), "id");
/// assert_eq!(id.serialized_name(), Some("ID"));
/// assert!(id.is_read_only());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMetadata {
    class: String,
    name: String,
    serialized_name: Option<String>,
    ty: Option<TypeDescriptor>,
    read_only: bool,
}

impl PropertyMetadata {
    /// Creates an untyped, writable property.
    ///
    /// The declaring class is filled in by
    /// [`ClassMetadata::with_property`](super::ClassMetadata::with_property).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            class: String::new(),
            name: name.into(),
            serialized_name: None,
            ty: None,
            read_only: false,
        }
    }

    #[inline]
    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.ty = Some(ty);
        self
    }

    #[inline]
    pub fn with_serialized_name(mut self, name: impl Into<String>) -> Self {
        self.serialized_name = Some(name.into());
        self
    }

    /// Marks the property as never written during deserialization.
    #[inline]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[inline]
    pub(super) fn set_class(&mut self, class: &str) {
        self.class = String::from(class);
    }

    /// The declaring class.
    #[inline]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn serialized_name(&self) -> Option<&str> {
        self.serialized_name.as_deref()
    }

    #[inline]
    pub fn ty(&self) -> Option<&TypeDescriptor> {
        self.ty.as_ref()
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}
