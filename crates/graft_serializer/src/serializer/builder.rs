use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;

use graft_utils::hash::{FixedHashState, HashMap};

use super::{Serializer, VisitorFactory};
use crate::construction::{DefaultObjectConstructor, ObjectConstructor};
use crate::event::EventDispatcher;
use crate::handler::HandlerRegistry;
use crate::metadata::{MetadataFactory, MetadataRegistry};
use crate::naming::{IdenticalNaming, PropertyNamingStrategy, SerializedNameNaming};
use crate::navigator::GraphNavigator;
use crate::visitor::Visitor;

// -----------------------------------------------------------------------------
// SerializerBuilder

/// Builder for [`Serializer`].
///
/// Unset parts fall back to an empty [`MetadataRegistry`], no handlers, no
/// listeners, the [`DefaultObjectConstructor`] and
/// [`SerializedNameNaming`] over [`IdenticalNaming`].
///
/// When no visitor is configured at all, or after
/// [`add_default_visitors`](Self::add_default_visitors), the built-in
/// visitors are registered for the formats they serve (`json` with the
/// `json` feature). Explicitly configured visitors are never replaced.
///
/// # Examples
///
/// ```
/// use graft_serializer::Serializer;
/// use graft_serializer::metadata::{ClassMetadata, MetadataRegistry, PropertyMetadata};
/// use graft_serializer::naming::SnakeCaseNaming;
/// use graft_serializer::types::TypeDescriptor;
///
/// let mut registry = MetadataRegistry::new();
/// registry.register(
///     ClassMetadata::new("User")
///         .with_property(PropertyMetadata::new("firstName").with_type(TypeDescriptor::parse("string").unwrap())),
/// );
///
/// let serializer = Serializer::builder()
///     .set_metadata_factory(registry)
///     .set_property_naming_strategy(SnakeCaseNaming::default())
///     .build();
/// # let _ = serializer;
/// ```
#[must_use]
pub struct SerializerBuilder {
    metadata_factory: Option<Arc<dyn MetadataFactory>>,
    handlers: HandlerRegistry,
    dispatcher: EventDispatcher,
    constructor: Option<Arc<dyn ObjectConstructor>>,
    naming: Option<Arc<dyn PropertyNamingStrategy>>,
    serialization_visitors: HashMap<String, VisitorFactory>,
    deserialization_visitors: HashMap<String, VisitorFactory>,
    default_visitors: bool,
}

impl Default for SerializerBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SerializerBuilder {
    #[inline]
    pub const fn new() -> Self {
        Self {
            metadata_factory: None,
            handlers: HandlerRegistry::new(),
            dispatcher: EventDispatcher::new(),
            constructor: None,
            naming: None,
            serialization_visitors: HashMap::with_hasher(FixedHashState),
            deserialization_visitors: HashMap::with_hasher(FixedHashState),
            default_visitors: false,
        }
    }

    #[inline]
    pub fn set_metadata_factory(mut self, factory: impl MetadataFactory + 'static) -> Self {
        self.metadata_factory = Some(Arc::new(factory));
        self
    }

    /// Runs `f` against the handler registry.
    #[inline]
    pub fn configure_handlers(mut self, f: impl FnOnce(&mut HandlerRegistry)) -> Self {
        f(&mut self.handlers);
        self
    }

    /// Runs `f` against the event dispatcher.
    #[inline]
    pub fn configure_listeners(mut self, f: impl FnOnce(&mut EventDispatcher)) -> Self {
        f(&mut self.dispatcher);
        self
    }

    #[inline]
    pub fn set_object_constructor(mut self, constructor: impl ObjectConstructor + 'static) -> Self {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// Sets the naming strategy handed to every visitor factory.
    #[inline]
    pub fn set_property_naming_strategy(mut self, naming: impl PropertyNamingStrategy + 'static) -> Self {
        self.naming = Some(Arc::new(naming));
        self
    }

    /// Registers the visitor used to serialize to `format`, replacing any
    /// previous one.
    pub fn set_serialization_visitor(
        mut self,
        format: impl Into<String>,
        factory: impl Fn(Arc<dyn PropertyNamingStrategy>) -> Box<dyn Visitor> + Send + Sync + 'static,
    ) -> Self {
        self.serialization_visitors.insert(format.into(), Arc::new(factory));
        self
    }

    /// Registers the visitor used to deserialize from `format`, replacing any
    /// previous one.
    pub fn set_deserialization_visitor(
        mut self,
        format: impl Into<String>,
        factory: impl Fn(Arc<dyn PropertyNamingStrategy>) -> Box<dyn Visitor> + Send + Sync + 'static,
    ) -> Self {
        self.deserialization_visitors.insert(format.into(), Arc::new(factory));
        self
    }

    /// Registers the built-in visitors for formats that have none yet.
    #[inline]
    pub fn add_default_visitors(mut self) -> Self {
        self.default_visitors = true;
        self
    }

    pub fn build(mut self) -> Serializer {
        if self.default_visitors
            || (self.serialization_visitors.is_empty() && self.deserialization_visitors.is_empty())
        {
            self.register_default_visitors();
        }

        let metadata_factory = self
            .metadata_factory
            .unwrap_or_else(|| Arc::new(MetadataRegistry::new()));
        let constructor = self
            .constructor
            .unwrap_or_else(|| Arc::new(DefaultObjectConstructor));
        let naming = self
            .naming
            .unwrap_or_else(|| Arc::new(SerializedNameNaming::new(IdenticalNaming)));

        let navigator = GraphNavigator::new(metadata_factory)
            .with_handlers(self.handlers)
            .with_dispatcher(self.dispatcher)
            .with_object_constructor(constructor);

        log::debug!(
            "serializer built with {} handler(s), {} serialization and {} deserialization format(s)",
            navigator.handlers().len(),
            self.serialization_visitors.len(),
            self.deserialization_visitors.len(),
        );

        Serializer {
            navigator,
            naming,
            serialization_visitors: self.serialization_visitors,
            deserialization_visitors: self.deserialization_visitors,
        }
    }

    #[cfg(feature = "json")]
    fn register_default_visitors(&mut self) {
        use crate::visitor::{Json, JsonDeserializationVisitor, JsonSerializationVisitor};

        self.serialization_visitors
            .entry(String::from("json"))
            .or_insert_with(|| {
                Arc::new(|naming: Arc<dyn PropertyNamingStrategy>| -> Box<dyn Visitor> {
                    Box::new(JsonSerializationVisitor::with_format(naming, Json::new()))
                })
            });
        self.deserialization_visitors
            .entry(String::from("json"))
            .or_insert_with(|| {
                Arc::new(|naming: Arc<dyn PropertyNamingStrategy>| -> Box<dyn Visitor> {
                    Box::new(JsonDeserializationVisitor::with_format(naming, Json::new()))
                })
            });
    }

    #[cfg(not(feature = "json"))]
    #[inline(always)]
    fn register_default_visitors(&mut self) {}
}
