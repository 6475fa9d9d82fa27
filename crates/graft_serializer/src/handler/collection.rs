use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use super::{SubscribingHandler, Subscription};
use crate::context::{Context, Direction};
use crate::error::{Error, Result};
use crate::types::{ScalarKind, TypeDescriptor};
use crate::value::Value;
use crate::visitor::Visitor;

const SERIALIZE: &str = "serializeCollection";
const DESERIALIZE: &str = "deserializeCollection";

/// Treats collection wrapper types as plain arrays.
///
/// A node typed `ArrayCollection<Item>` is visited as `array<Item>`, in both
/// directions.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use graft_serializer::context::Direction;
/// use graft_serializer::handler::{CollectionHandler, HandlerRegistry};
///
/// let mut registry = HandlerRegistry::new();
/// registry.register_subscribing_handler(Arc::new(
///     CollectionHandler::new(["ArrayCollection"]).with_formats(["json"]),
/// ));
///
/// assert!(registry.get_handler(Direction::Deserialization, "ArrayCollection", "json").is_some());
/// assert!(registry.get_handler(Direction::Deserialization, "ArrayCollection", "xml").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CollectionHandler {
    types: Vec<Cow<'static, str>>,
    formats: Vec<Cow<'static, str>>,
}

impl CollectionHandler {
    /// Handles the given wrapper type names in any format.
    pub fn new<T: Into<Cow<'static, str>>>(types: impl IntoIterator<Item = T>) -> Self {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            formats: Vec::new(),
        }
    }

    /// Restricts the handler to the given formats.
    pub fn with_formats<T: Into<Cow<'static, str>>>(mut self, formats: impl IntoIterator<Item = T>) -> Self {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }
}

impl SubscribingHandler for CollectionHandler {
    fn subscribing_methods(&self) -> Vec<Subscription> {
        let mut methods = Vec::new();
        for type_name in &self.types {
            for (direction, method) in [
                (Direction::Serialization, SERIALIZE),
                (Direction::Deserialization, DESERIALIZE),
            ] {
                let subscription = Subscription::new(type_name.clone())
                    .with_direction(direction)
                    .with_method(method);
                if self.formats.is_empty() {
                    methods.push(subscription);
                } else {
                    methods.extend(
                        self.formats
                            .iter()
                            .map(|format| subscription.clone().with_format(format.clone())),
                    );
                }
            }
        }
        methods
    }

    fn call(
        &self,
        method: &str,
        visitor: &mut dyn Visitor,
        data: &Value,
        ty: &TypeDescriptor,
        context: &mut Context<'_>,
    ) -> Result<Value> {
        match method {
            SERIALIZE | DESERIALIZE => visitor.visit_array(data, &ty.renamed(ScalarKind::ARRAY), context),
            other => Err(Error::UnknownHandlerMethod {
                method: String::from(other),
                type_name: String::from(ty.name()),
            }),
        }
    }
}
