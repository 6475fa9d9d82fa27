//! The graph navigator: one recursive algorithm serving both directions.
//!
//! [`GraphNavigator::accept`] visits one node. Each node goes through, in
//! order:
//!
//! 1. type resolution (inference, `null` override, polymorphic narrowing);
//! 2. the scalar fast path (`null`, `string`, `integer`, `boolean`,
//!    `double`/`float`, `array`), which never touches metadata;
//! 3. the cycle guard (serialization) and depth tracking;
//! 4. the pre-visit event, which may replace data and type;
//! 5. custom handler dispatch;
//! 6. class metadata and, when deserializing a base class, discriminator
//!    resolution;
//! 7. class exclusion;
//! 8. pre lifecycle callbacks, instance construction, the property loop and
//!    post lifecycle callbacks;
//! 9. the post-visit event.


use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;

use crate::construction::{DefaultObjectConstructor, ObjectConstructor};
use crate::context::{Context, Direction};
use crate::error::{Error, Result};
use crate::event::{EventDispatcher, ObjectEvent, Phase};
use crate::handler::HandlerRegistry;
use crate::metadata::{ClassMetadata, Discriminator, MetadataFactory};
use crate::types::{ScalarKind, TypeDescriptor};
use crate::value::Value;
use crate::visitor::Visitor;

// -----------------------------------------------------------------------------
// GraphNavigator

/// Walks a typed value graph, dispatching every node to a [`Visitor`].
///
/// The navigator is immutable once built and can be shared between calls;
/// all per-call state lives in the [`Context`].
pub struct GraphNavigator {
    metadata_factory: Arc<dyn MetadataFactory>,
    handlers: Arc<HandlerRegistry>,
    dispatcher: Arc<EventDispatcher>,
    constructor: Arc<dyn ObjectConstructor>,
}

impl GraphNavigator {
    /// Creates a navigator with no handlers, no listeners and the
    /// [`DefaultObjectConstructor`].
    pub fn new(metadata_factory: Arc<dyn MetadataFactory>) -> Self {
        Self {
            metadata_factory,
            handlers: Arc::new(HandlerRegistry::new()),
            dispatcher: Arc::new(EventDispatcher::new()),
            constructor: Arc::new(DefaultObjectConstructor),
        }
    }

    #[inline]
    pub fn with_handlers(mut self, handlers: impl Into<Arc<HandlerRegistry>>) -> Self {
        self.handlers = handlers.into();
        self
    }

    #[inline]
    pub fn with_dispatcher(mut self, dispatcher: impl Into<Arc<EventDispatcher>>) -> Self {
        self.dispatcher = dispatcher.into();
        self
    }

    #[inline]
    pub fn with_object_constructor(mut self, constructor: Arc<dyn ObjectConstructor>) -> Self {
        self.constructor = constructor;
        self
    }

    #[inline]
    pub fn metadata_factory(&self) -> &dyn MetadataFactory {
        &*self.metadata_factory
    }

    #[inline]
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    #[inline]
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Visits one node and returns its result.
    ///
    /// `ty` is the declared type; it may be `None` only when serializing.
    /// With the `debug` feature, errors raised below a class node carry the
    /// class metadata stack.
    pub fn accept(
        &self,
        visitor: &mut dyn Visitor,
        data: &Value,
        ty: Option<&TypeDescriptor>,
        context: &mut Context<'_>,
    ) -> Result<Value> {
        self.visit(visitor, data, ty, context)
            .map_err(|err| annotate(err, context))
    }

    fn visit(
        &self,
        visitor: &mut dyn Visitor,
        data: &Value,
        declared: Option<&TypeDescriptor>,
        context: &mut Context<'_>,
    ) -> Result<Value> {
        let direction = context.direction();
        let ty = self.resolve_type(data, declared, context)?;

        if let Some(kind) = ty.scalar_kind() {
            return match kind {
                ScalarKind::Null => visitor.visit_null(data, &ty, context),
                ScalarKind::String => visitor.visit_string(data, &ty, context),
                ScalarKind::Integer => visitor.visit_integer(data, &ty, context),
                ScalarKind::Boolean => visitor.visit_boolean(data, &ty, context),
                ScalarKind::Double => visitor.visit_double(data, &ty, context),
                ScalarKind::Array => visitor.visit_array(data, &ty, context),
                ScalarKind::Resource => Err(Error::UnsupportedValue { path: context.path() }),
            };
        }

        let Some(scope) = context.enter_scope(data) else {
            return Ok(Value::Null);
        };
        let visited = self.visit_scoped(visitor, data, ty, context);
        context.leave_scope(scope);

        let (metadata, ty, subject, result) = match visited? {
            Visited::Done(result) => return Ok(result),
            Visited::Object { metadata, ty, subject, result } => (metadata, ty, subject, result),
        };

        for callback in metadata.callbacks(Phase::Post, direction) {
            callback(&subject);
        }

        if self
            .dispatcher
            .has_listeners(Phase::Post, metadata.name(), direction, context.format())
        {
            let mut event = ObjectEvent::new(context, subject, ty);
            self.dispatcher.dispatch(
                Phase::Post,
                metadata.name(),
                direction,
                context.format(),
                &mut event,
            )?;
        }

        Ok(result)
    }

    /// The part of a visit that runs inside the node's scope.
    fn visit_scoped(
        &self,
        visitor: &mut dyn Visitor,
        data: &Value,
        ty: TypeDescriptor,
        context: &mut Context<'_>,
    ) -> Result<Visited> {
        let direction = context.direction();
        let mut data = Cow::Borrowed(data);
        let mut ty = ty;

        if self
            .dispatcher
            .has_listeners(Phase::Pre, ty.name(), direction, context.format())
        {
            let mut event = ObjectEvent::new(context, data.clone().into_owned(), ty.clone());
            self.dispatcher
                .dispatch(Phase::Pre, ty.name(), direction, context.format(), &mut event)?;
            let (new_data, new_ty) = event.into_parts();
            data = Cow::Owned(new_data);
            ty = new_ty;
        }

        if let Some(handler) = self.handlers.get_handler(direction, ty.name(), context.format()) {
            log::trace!("handler dispatch for `{ty}` ({direction})");
            return handler(visitor, &*data, &ty, context).map(Visited::Done);
        }

        let mut metadata = self.metadata_factory.metadata_for_class(ty.name())?;

        if direction == Direction::Deserialization
            && let Some(discriminator) = metadata.discriminator()
            && discriminator.base_class() == ty.name()
        {
            let resolved = self.resolve_discriminator(discriminator, &data)?;
            metadata = resolved;
        }

        if let Some(exclusion) = context.exclusion_strategy()
            && exclusion.should_skip_class(&metadata, context)
        {
            log::debug!("class `{}` excluded at `{}`", metadata.name(), context.path());
            return Ok(Visited::Done(Value::Null));
        }

        context.push_class_metadata(Arc::clone(&metadata));
        let visited = self
            .visit_object(visitor, &metadata, &data, &ty, context)
            .map_err(|err| annotate(err, context));
        context.pop_class_metadata();
        let result = visited?;

        let subject = match direction {
            Direction::Serialization => data.into_owned(),
            Direction::Deserialization => result.clone(),
        };

        Ok(Visited::Object { metadata, ty, subject, result })
    }

    /// Pre callbacks, construction and the property loop of a class node whose
    /// metadata is on top of the stack.
    fn visit_object(
        &self,
        visitor: &mut dyn Visitor,
        metadata: &Arc<ClassMetadata>,
        data: &Value,
        ty: &TypeDescriptor,
        context: &mut Context<'_>,
    ) -> Result<Value> {
        let direction = context.direction();

        for callback in metadata.callbacks(Phase::Pre, direction) {
            callback(data);
        }

        let object = match direction {
            Direction::Serialization => data.clone(),
            Direction::Deserialization => self
                .constructor
                .construct(visitor, metadata, data, ty, context)?,
        };

        visitor.start_visiting_object(metadata, &object, ty, context)?;

        for property in metadata.properties() {
            if direction == Direction::Deserialization && property.is_read_only() {
                continue;
            }
            if let Some(exclusion) = context.exclusion_strategy()
                && exclusion.should_skip_property(property, context)
            {
                log::debug!("property `{}::{}` excluded", metadata.name(), property.name());
                continue;
            }

            context.push_property_metadata(Arc::clone(property));
            let visited = visitor.visit_property(property, data, context);
            context.pop_property_metadata();
            visited?;
        }

        visitor.end_visiting_object(metadata, data, ty, context)
    }

    /// Effective type of a node before any dispatch.
    fn resolve_type(
        &self,
        data: &Value,
        declared: Option<&TypeDescriptor>,
        context: &Context<'_>,
    ) -> Result<TypeDescriptor> {
        match context.direction() {
            Direction::Deserialization => declared.cloned().ok_or(Error::MissingType),
            Direction::Serialization if data.is_null() => Ok(TypeDescriptor::null()),
            Direction::Serialization => Ok(match (declared, data) {
                (None, _) => TypeDescriptor::infer(data),
                // A declared base class or interface narrows to the concrete class.
                (Some(declared), Value::Object(object))
                    if declared.scalar_kind().is_none()
                        && self
                            .metadata_factory
                            .is_subclass_of(object.class_name(), declared.name()) =>
                {
                    TypeDescriptor::new(String::from(object.class_name()))
                }
                (Some(declared), _) => declared.clone(),
            }),
        }
    }

    /// Picks the concrete class named by the discriminator field of `data`.
    fn resolve_discriminator(
        &self,
        discriminator: &Discriminator,
        data: &Value,
    ) -> Result<Arc<ClassMetadata>> {
        let field = discriminator.field_name();
        let value = match data.field(field) {
            Some(Value::Null) | None => {
                return Err(Error::DiscriminatorFieldNotFound {
                    field: String::from(field),
                    class: String::from(discriminator.base_class()),
                });
            }
            Some(value) => value.coerce_string()?,
        };

        let Some(class) = discriminator.class_for(&value) else {
            return Err(Error::UnknownDiscriminatorValue {
                value,
                class: String::from(discriminator.base_class()),
                available: discriminator.available(),
            });
        };

        log::debug!(
            "discriminator `{field}` = `{value}` selects `{class}` for `{}`",
            discriminator.base_class(),
        );
        self.metadata_factory.metadata_for_class(class)
    }
}

/// Outcome of the scoped part of a visit.
enum Visited {
    /// Final result; no post-visit work.
    Done(Value),
    /// A class node whose post callbacks and post event are still due.
    Object {
        metadata: Arc<ClassMetadata>,
        ty: TypeDescriptor,
        subject: Value,
        result: Value,
    },
}

#[cfg(feature = "debug")]
fn annotate(err: Error, context: &Context<'_>) -> Error {
    match err {
        Error::WithStack { .. } => err,
        err if context.metadata_stack().is_empty() => err,
        err => Error::WithStack {
            source: alloc::boxed::Box::new(err),
            stack: alloc::format!("{:?}", context.metadata_stack()),
        },
    }
}

#[cfg(not(feature = "debug"))]
#[inline(always)]
fn annotate(err: Error, _context: &Context<'_>) -> Error {
    err
}
