use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use graft_utils::hash::{FixedHashState, HashMap};

use super::ClassMetadata;
use crate::error::{Error, Result};

// -----------------------------------------------------------------------------
// MetadataFactory

/// The source of class metadata consulted by the navigator.
pub trait MetadataFactory: Send + Sync {
    /// Returns the metadata of `name`, or [`Error::UnknownClass`].
    fn metadata_for_class(&self, name: &str) -> Result<Arc<ClassMetadata>>;

    fn has_class(&self, name: &str) -> bool;

    /// Returns `true` if `class` strictly extends or implements `ancestor`.
    ///
    /// The default implementation walks parents and interfaces through
    /// [`metadata_for_class`](Self::metadata_for_class). Unknown classes end
    /// the walk on their branch.
    fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        if class == ancestor {
            return false;
        }

        let mut pending: Vec<String> = alloc::vec![String::from(class)];
        let mut seen: Vec<String> = Vec::new();

        while let Some(current) = pending.pop() {
            if seen.contains(&current) {
                continue;
            }
            let Ok(metadata) = self.metadata_for_class(&current) else {
                seen.push(current);
                continue;
            };
            for next in metadata.parent().into_iter().chain(metadata.interfaces().iter().map(String::as_str)) {
                if next == ancestor {
                    return true;
                }
                pending.push(String::from(next));
            }
            seen.push(current);
        }

        false
    }
}

// -----------------------------------------------------------------------------
// MetadataRegistry

/// An in-memory [`MetadataFactory`] filled eagerly before use.
///
/// A class registered after its parent inherits the parent's properties
/// (in front of its own) and, unless it declares one, its discriminator.
///
/// # Examples
///
/// ```
/// use graft_serializer::metadata::{ClassMetadata, MetadataFactory, MetadataRegistry, PropertyMetadata};
///
/// let mut registry = MetadataRegistry::new();
/// registry.register(ClassMetadata::new("Animal").with_property(PropertyMetadata::new("name")));
/// registry.register(ClassMetadata::new("Dog").with_parent("Animal").with_property(PropertyMetadata::new("breed")));
///
/// let dog = registry.metadata_for_class("Dog").unwrap();
/// assert_eq!(dog.properties().len(), 2);
/// assert!(registry.is_subclass_of("Dog", "Animal"));
/// assert!(!registry.is_subclass_of("Animal", "Animal"));
/// ```
#[derive(Default)]
pub struct MetadataRegistry {
    classes: HashMap<String, Arc<ClassMetadata>>,
}

impl MetadataRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            classes: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Registers or replaces the metadata of a class.
    pub fn register(&mut self, mut metadata: ClassMetadata) -> &mut Self {
        if let Some(parent) = metadata.parent().and_then(|name| self.classes.get(name)) {
            let parent = Arc::clone(parent);
            metadata.inherit(&parent);
        }
        if self.classes.contains_key(metadata.name()) {
            log::debug!("replacing metadata of class `{}`", metadata.name());
        }
        self.classes
            .insert(String::from(metadata.name()), Arc::new(metadata));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl MetadataFactory for MetadataRegistry {
    fn metadata_for_class(&self, name: &str) -> Result<Arc<ClassMetadata>> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownClass(String::from(name)))
    }

    #[inline]
    fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{MetadataFactory, MetadataRegistry};
    use crate::error::Error;
    use crate::metadata::{ClassMetadata, Discriminator, PropertyMetadata};

    fn registry() -> MetadataRegistry {
        let mut registry = MetadataRegistry::new();
        registry
            .register(
                ClassMetadata::new("Animal")
                    .with_interface("Named")
                    .with_property(PropertyMetadata::new("name"))
                    .with_discriminator(Discriminator::new("type", "Animal").with_mapping("dog", "Dog")),
            )
            .register(
                ClassMetadata::new("Dog")
                    .with_parent("Animal")
                    .with_property(PropertyMetadata::new("breed"))
                    .with_property(PropertyMetadata::new("name").read_only()),
            );
        registry
    }

    #[test]
    fn subclass_inherits_parent() {
        let registry = registry();
        let dog = registry.metadata_for_class("Dog").unwrap();

        let names: Vec<_> = dog.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["name", "breed"]);
        assert!(dog.property("name").unwrap().is_read_only());
        assert_eq!(dog.discriminator().unwrap().base_class(), "Animal");
    }

    #[test]
    fn subclass_walks_interfaces() {
        let registry = registry();
        assert!(registry.is_subclass_of("Dog", "Animal"));
        assert!(registry.is_subclass_of("Dog", "Named"));
        assert!(!registry.is_subclass_of("Animal", "Dog"));
        assert!(!registry.is_subclass_of("Cat", "Animal"));
    }

    #[test]
    fn unknown_class() {
        let registry = registry();
        assert!(!registry.has_class("Cat"));
        assert!(matches!(
            registry.metadata_for_class("Cat"),
            Err(Error::UnknownClass(name)) if name == "Cat"
        ));
    }
}
