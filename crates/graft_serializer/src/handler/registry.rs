use alloc::string::String;
use alloc::sync::Arc;
use core::hash::{Hash, Hasher};

use graft_utils::hash::{FixedHashState, HashMap};
use graft_utils::hash::hashbrown::Equivalent;

use super::{Handler, SubscribingHandler};
use crate::context::{Context, Direction};
use crate::error::Result;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::visitor::Visitor;

// -----------------------------------------------------------------------------
// Keys

struct HandlerKey {
    direction: Option<Direction>,
    type_name: String,
    format: Option<String>,
}

/// Borrowed form of [`HandlerKey`], used for lookups without allocating.
struct HandlerKeyRef<'a> {
    direction: Option<Direction>,
    type_name: &'a str,
    format: Option<&'a str>,
}

// Both hash the same fields as borrowed data.
impl Hash for HandlerKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.direction.hash(state);
        self.type_name.as_str().hash(state);
        self.format.as_deref().hash(state);
    }
}

impl Hash for HandlerKeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.direction.hash(state);
        self.type_name.hash(state);
        self.format.hash(state);
    }
}

impl PartialEq for HandlerKey {
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction
            && self.type_name == other.type_name
            && self.format == other.format
    }
}

impl Eq for HandlerKey {}

impl Equivalent<HandlerKey> for HandlerKeyRef<'_> {
    fn equivalent(&self, key: &HandlerKey) -> bool {
        self.direction == key.direction
            && self.type_name == key.type_name
            && self.format == key.format.as_deref()
    }
}

// -----------------------------------------------------------------------------
// HandlerRegistry

/// Custom handlers keyed by direction, type name and format.
///
/// `None` as direction or format registers a wildcard. Lookup tries, in
/// order: the exact key, any format, any direction, then both wildcards.
///
/// # Examples
///
/// ```
/// use graft_serializer::context::Direction;
/// use graft_serializer::handler::HandlerRegistry;
/// use graft_serializer::value::Value;
///
/// let mut registry = HandlerRegistry::new();
/// registry.register(None, "Money", None, |_, _, _, _| Ok(Value::from("any")));
/// registry.register(Some(Direction::Serialization), "Money", Some("json"), |_, _, _, _| Ok(Value::from("exact")));
///
/// assert!(registry.get_handler(Direction::Serialization, "Money", "json").is_some());
/// assert!(registry.get_handler(Direction::Deserialization, "Money", "xml").is_some());
/// assert!(registry.get_handler(Direction::Serialization, "User", "json").is_none());
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<HandlerKey, Handler>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            handlers: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Registers a handler. The last registration for a key wins.
    pub fn register(
        &mut self,
        direction: Option<Direction>,
        type_name: &str,
        format: Option<&str>,
        handler: impl Fn(&mut dyn Visitor, &Value, &TypeDescriptor, &mut Context<'_>) -> Result<Value>
        + Send
        + Sync
        + 'static,
    ) -> &mut Self {
        self.register_handler(direction, type_name, format, Arc::new(handler))
    }

    /// Registers an already shared handler. The last registration for a key wins.
    pub fn register_handler(
        &mut self,
        direction: Option<Direction>,
        type_name: &str,
        format: Option<&str>,
        handler: Handler,
    ) -> &mut Self {
        let key = HandlerKey {
            direction,
            type_name: String::from(type_name),
            format: format.map(String::from),
        };
        if self.handlers.insert(key, handler).is_some() {
            log::warn!(
                "handler for `{type_name}` ({}, {}) was registered twice, keeping the last one",
                direction.map_or("any direction", Direction::as_str),
                format.unwrap_or("any format"),
            );
        }
        self
    }

    /// Registers every method a subscribing handler lists.
    ///
    /// A subscription without a direction is registered for both; one
    /// without a method name uses [`default_method`](Self::default_method).
    pub fn register_subscribing_handler<H: SubscribingHandler>(&mut self, handler: Arc<H>) -> &mut Self {
        for subscription in handler.subscribing_methods() {
            let directions: &[Direction] = match subscription.direction {
                Some(Direction::Serialization) => &[Direction::Serialization],
                Some(Direction::Deserialization) => &[Direction::Deserialization],
                None => &[Direction::Serialization, Direction::Deserialization],
            };

            for &direction in directions {
                let method = match &subscription.method {
                    Some(method) => String::from(method.as_ref()),
                    None => Self::default_method(
                        direction,
                        &subscription.type_name,
                        subscription.format.as_deref(),
                    ),
                };

                let target = Arc::clone(&handler);
                let type_name = String::from(subscription.type_name.as_ref());
                self.register(
                    Some(direction),
                    &subscription.type_name,
                    subscription.format.as_deref(),
                    move |visitor, data, ty, context| {
                        log::trace!("calling `{method}` for `{type_name}`");
                        target.call(&method, visitor, data, ty, context)
                    },
                );
            }
        }
        self
    }

    /// Finds the handler for a node, trying wildcards after the exact key.
    pub fn get_handler(&self, direction: Direction, type_name: &str, format: &str) -> Option<&Handler> {
        let candidates = [
            (Some(direction), Some(format)),
            (Some(direction), None),
            (None, Some(format)),
            (None, None),
        ];

        candidates.into_iter().find_map(|(direction, format)| {
            self.handlers.get(&HandlerKeyRef {
                direction,
                type_name,
                format,
            })
        })
    }

    /// The method name a subscription uses when it names none:
    /// `serialize{Type}To{Format}` or `deserialize{Type}From{Format}`.
    ///
    /// `Type` is the last segment of the type name after `::`, `\` or `.`;
    /// `Format` is capitalised and empty for the wildcard.
    ///
    /// # Examples
    ///
    /// ```
    /// use graft_serializer::context::Direction;
    /// use graft_serializer::handler::HandlerRegistry;
    ///
    /// assert_eq!(
    ///     HandlerRegistry::default_method(Direction::Serialization, "app::model::Money", Some("json")),
    ///     "serializeMoneyToJson",
    /// );
    /// assert_eq!(
    ///     HandlerRegistry::default_method(Direction::Deserialization, r"App\DateTime", Some("xml")),
    ///     "deserializeDateTimeFromXml",
    /// );
    /// ```
    pub fn default_method(direction: Direction, type_name: &str, format: Option<&str>) -> String {
        let short = type_name
            .rsplit(|c: char| matches!(c, ':' | '\\' | '.'))
            .next()
            .unwrap_or(type_name);

        let mut method = String::with_capacity(short.len() + 24);
        match direction {
            Direction::Serialization => method.push_str("serialize"),
            Direction::Deserialization => method.push_str("deserialize"),
        }
        method.push_str(short);
        match direction {
            Direction::Serialization => method.push_str("To"),
            Direction::Deserialization => method.push_str("From"),
        }

        let mut chars = format.unwrap_or_default().chars();
        if let Some(first) = chars.next() {
            method.extend(first.to_uppercase());
            method.push_str(chars.as_str());
        }
        method
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::HandlerRegistry;
    use crate::context::{Context, ContextOptions, Direction};
    use crate::error::{Error, Result};
    use crate::handler::{SubscribingHandler, Subscription};
    use crate::metadata::MetadataRegistry;
    use crate::naming::IdenticalNaming;
    use crate::navigator::GraphNavigator;
    use crate::types::TypeDescriptor;
    use crate::value::Value;
    use crate::visitor::{SerializationVisitor, Visitor};

    fn tagged(registry: &mut HandlerRegistry, direction: Option<Direction>, format: Option<&str>, tag: &'static str) {
        registry.register(direction, "Money", format, move |_, _, _, _| Ok(Value::from(tag)));
    }

    fn call(registry: &HandlerRegistry, direction: Direction, format: &str) -> Option<Value> {
        let navigator = GraphNavigator::new(Arc::new(MetadataRegistry::new()));
        let mut context = Context::new(&navigator, direction, format, ContextOptions::new());
        let mut visitor = SerializationVisitor::new(Arc::new(IdenticalNaming));
        let handler = registry.get_handler(direction, "Money", format)?;
        Some(handler(&mut visitor, &Value::Null, &TypeDescriptor::new("Money"), &mut context).unwrap())
    }

    #[test]
    fn cascade_order() {
        let mut registry = HandlerRegistry::new();
        tagged(&mut registry, None, None, "any");
        assert_eq!(call(&registry, Direction::Serialization, "json"), Some(Value::from("any")));

        tagged(&mut registry, None, Some("json"), "format");
        assert_eq!(call(&registry, Direction::Serialization, "json"), Some(Value::from("format")));
        assert_eq!(call(&registry, Direction::Serialization, "xml"), Some(Value::from("any")));

        tagged(&mut registry, Some(Direction::Serialization), None, "direction");
        assert_eq!(call(&registry, Direction::Serialization, "json"), Some(Value::from("direction")));
        assert_eq!(call(&registry, Direction::Deserialization, "json"), Some(Value::from("format")));

        tagged(&mut registry, Some(Direction::Serialization), Some("json"), "exact");
        assert_eq!(call(&registry, Direction::Serialization, "json"), Some(Value::from("exact")));
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = HandlerRegistry::new();
        tagged(&mut registry, Some(Direction::Serialization), Some("json"), "first");
        tagged(&mut registry, Some(Direction::Serialization), Some("json"), "second");
        assert_eq!(registry.len(), 1);
        assert_eq!(call(&registry, Direction::Serialization, "json"), Some(Value::from("second")));
    }

    struct MoneyHandler;

    impl SubscribingHandler for MoneyHandler {
        fn subscribing_methods(&self) -> Vec<Subscription> {
            alloc::vec![
                Subscription::new("app::Money").with_format("json"),
                Subscription::new("Money").with_method("custom"),
                Subscription::new("Broken")
                    .with_direction(Direction::Serialization)
                    .with_method("missing"),
            ]
        }

        fn call(
            &self,
            method: &str,
            _: &mut dyn Visitor,
            _: &Value,
            _: &TypeDescriptor,
            _: &mut Context<'_>,
        ) -> Result<Value> {
            match method {
                "serializeMoneyToJson" | "deserializeMoneyFromJson" | "custom" => {
                    Ok(Value::String(String::from(method)))
                }
                other => Err(Error::UnknownHandlerMethod {
                    method: other.into(),
                    type_name: String::from("Money"),
                }),
            }
        }
    }

    #[test]
    fn subscribing_registration() {
        let mut registry = HandlerRegistry::new();
        registry.register_subscribing_handler(Arc::new(MoneyHandler));

        // Two directions for each of the first two subscriptions, one for the last.
        assert_eq!(registry.len(), 5);

        let navigator = GraphNavigator::new(Arc::new(MetadataRegistry::new()));
        let mut context = Context::new(&navigator, Direction::Deserialization, "json", ContextOptions::new());
        let mut visitor = SerializationVisitor::new(Arc::new(IdenticalNaming));
        let ty = TypeDescriptor::new("app::Money");

        let handler = registry.get_handler(Direction::Deserialization, "app::Money", "json").unwrap();
        let result = handler(&mut visitor, &Value::Null, &ty, &mut context).unwrap();
        assert_eq!(result, Value::from("deserializeMoneyFromJson"));

        let handler = registry.get_handler(Direction::Deserialization, "Money", "yaml").unwrap();
        let result = handler(&mut visitor, &Value::Null, &ty, &mut context).unwrap();
        assert_eq!(result, Value::from("custom"));

        assert!(registry.get_handler(Direction::Deserialization, "Broken", "json").is_none());
        let handler = registry.get_handler(Direction::Serialization, "Broken", "json").unwrap();
        let err = handler(&mut visitor, &Value::Null, &ty, &mut context).unwrap_err();
        assert!(matches!(err, Error::UnknownHandlerMethod { method, .. } if method == "missing"));
    }

    #[test]
    fn default_method_wildcard_format() {
        assert_eq!(
            HandlerRegistry::default_method(Direction::Serialization, "Money", None),
            "serializeMoneyTo"
        );
        assert_eq!(
            HandlerRegistry::default_method(Direction::Deserialization, "a.b.Money", Some("")),
            "deserializeMoneyFrom"
        );
    }
}
