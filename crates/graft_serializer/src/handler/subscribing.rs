use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::context::{Context, Direction};
use crate::error::Result;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::visitor::Visitor;

/// One method a [`SubscribingHandler`] offers.
///
/// Unset direction means both directions; unset format means any format;
/// unset method means [`HandlerRegistry::default_method`].
///
/// [`HandlerRegistry::default_method`]: super::HandlerRegistry::default_method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub direction: Option<Direction>,
    pub type_name: Cow<'static, str>,
    pub format: Option<Cow<'static, str>>,
    pub method: Option<Cow<'static, str>>,
}

impl Subscription {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            direction: None,
            type_name: type_name.into(),
            format: None,
            method: None,
        }
    }

    #[inline]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    #[inline]
    pub fn with_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[inline]
    pub fn with_method(mut self, method: impl Into<Cow<'static, str>>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// A handler object offering several named methods, registered in bulk with
/// [`HandlerRegistry::register_subscribing_handler`].
///
/// [`HandlerRegistry::register_subscribing_handler`]: super::HandlerRegistry::register_subscribing_handler
pub trait SubscribingHandler: Send + Sync + 'static {
    fn subscribing_methods(&self) -> Vec<Subscription>;

    /// Runs the method named `method`.
    ///
    /// Names that were subscribed but are not provided should fail with
    /// [`Error::UnknownHandlerMethod`](crate::Error::UnknownHandlerMethod).
    fn call(
        &self,
        method: &str,
        visitor: &mut dyn Visitor,
        data: &Value,
        ty: &TypeDescriptor,
        context: &mut Context<'_>,
    ) -> Result<Value>;
}
