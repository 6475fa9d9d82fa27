//! The serializer facade: one entry point per direction over a shared
//! [`GraphNavigator`].
//!
//! Wire formats are looked up by name in per-direction visitor tables; every
//! call builds a fresh visitor and [`Context`].

// -----------------------------------------------------------------------------
// Modules

mod builder;

// -----------------------------------------------------------------------------
// Exports

pub use builder::SerializerBuilder;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;

use graft_utils::hash::HashMap;

use crate::context::{Context, ContextOptions, Direction};
use crate::error::{Error, Result};
use crate::naming::PropertyNamingStrategy;
use crate::navigator::GraphNavigator;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::visitor::{DeserializationVisitor, SerializationVisitor, Visitor};

/// Creates the visitor for one call, given the configured naming strategy.
pub type VisitorFactory =
    Arc<dyn Fn(Arc<dyn PropertyNamingStrategy>) -> Box<dyn Visitor> + Send + Sync>;

/// Format under which in-memory conversions match handlers and listeners.
const VALUE_FORMAT: &str = "json";

// -----------------------------------------------------------------------------
// Serializer

/// Converts object graphs to and from wire formats.
///
/// Built with [`Serializer::builder`]; immutable and shareable afterwards.
///
/// # Examples
///
/// ```
/// use graft_serializer::Serializer;
/// use graft_serializer::context::ContextOptions;
/// use graft_serializer::value::Value;
///
/// let serializer = Serializer::builder().build();
/// let list = Value::List(vec![Value::from(1), Value::from("two")]);
///
/// let text = serializer.serialize(&list, "json", ContextOptions::new()).unwrap();
/// assert_eq!(text, r#"[1,"two"]"#);
///
/// let back = serializer.deserialize(&text, "array<string>", "json", ContextOptions::new()).unwrap();
/// assert_eq!(back, Value::List(vec![Value::from("1"), Value::from("two")]));
/// ```
pub struct Serializer {
    navigator: GraphNavigator,
    naming: Arc<dyn PropertyNamingStrategy>,
    serialization_visitors: HashMap<String, VisitorFactory>,
    deserialization_visitors: HashMap<String, VisitorFactory>,
}

impl Serializer {
    #[inline]
    pub const fn builder() -> SerializerBuilder {
        SerializerBuilder::new()
    }

    #[inline]
    pub fn navigator(&self) -> &GraphNavigator {
        &self.navigator
    }

    /// Returns `true` if `format` has a visitor for `direction`.
    pub fn supports_format(&self, direction: Direction, format: &str) -> bool {
        self.visitors(direction).contains_key(format)
    }

    /// Serializes `data` to `format`. The root type is inferred.
    pub fn serialize(&self, data: &Value, format: &str, options: ContextOptions) -> Result<String> {
        let mut visitor = self.visitor(Direction::Serialization, format)?;
        match self.run(&mut *visitor, Direction::Serialization, format, data.clone(), None, options)? {
            Value::String(text) => Ok(text),
            other => Err(Error::InvalidValue {
                expected: "serialized text",
                found: String::from(other.kind_name()),
            }),
        }
    }

    /// Deserializes `text` in `format` as the type declared by `ty`.
    pub fn deserialize(&self, text: &str, ty: &str, format: &str, options: ContextOptions) -> Result<Value> {
        let ty = TypeDescriptor::parse(ty)?;
        let mut visitor = self.visitor(Direction::Deserialization, format)?;
        self.run(
            &mut *visitor,
            Direction::Deserialization,
            format,
            Value::String(String::from(text)),
            Some(&ty),
            options,
        )
    }

    /// Flattens `data` into a tree of lists, maps and scalars.
    pub fn to_value(&self, data: &Value, options: ContextOptions) -> Result<Value> {
        let mut visitor = SerializationVisitor::new(Arc::clone(&self.naming));
        self.run(&mut visitor, Direction::Serialization, VALUE_FORMAT, data.clone(), None, options)
    }

    /// Rebuilds an object graph of type `ty` from a tree of lists, maps and
    /// scalars.
    pub fn from_value(&self, data: &Value, ty: &str, options: ContextOptions) -> Result<Value> {
        let ty = TypeDescriptor::parse(ty)?;
        let mut visitor = DeserializationVisitor::new(Arc::clone(&self.naming));
        self.run(
            &mut visitor,
            Direction::Deserialization,
            VALUE_FORMAT,
            data.clone(),
            Some(&ty),
            options,
        )
    }

    #[inline]
    fn visitors(&self, direction: Direction) -> &HashMap<String, VisitorFactory> {
        match direction {
            Direction::Serialization => &self.serialization_visitors,
            Direction::Deserialization => &self.deserialization_visitors,
        }
    }

    fn visitor(&self, direction: Direction, format: &str) -> Result<Box<dyn Visitor>> {
        match self.visitors(direction).get(format) {
            Some(factory) => Ok(factory(Arc::clone(&self.naming))),
            None => Err(Error::UnsupportedFormat {
                format: String::from(format),
                direction,
            }),
        }
    }

    fn run(
        &self,
        visitor: &mut dyn Visitor,
        direction: Direction,
        format: &str,
        data: Value,
        ty: Option<&TypeDescriptor>,
        options: ContextOptions,
    ) -> Result<Value> {
        visitor.set_navigator(&self.navigator);
        let data = visitor.prepare(data)?;

        let mut context = Context::new(&self.navigator, direction, format, options);
        let root = context.accept(visitor, &data, ty)?;
        visitor.get_result(root)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Serializer, SerializerBuilder};
    use crate::context::{ContextOptions, Direction};
    use crate::error::Error;
    use crate::handler::CollectionHandler;
    use crate::metadata::{ClassMetadata, Discriminator, MetadataRegistry, PropertyMetadata};
    use crate::naming::{PropertyNamingStrategy, SnakeCaseNaming};
    use crate::types::TypeDescriptor;
    use crate::value::{ObjectRef, Value};
    use crate::visitor::{Json, JsonSerializationVisitor, Visitor};

    fn prop(name: &str, ty: &str) -> PropertyMetadata {
        PropertyMetadata::new(name).with_type(TypeDescriptor::parse(ty).unwrap())
    }

    fn registry() -> MetadataRegistry {
        let mut registry = MetadataRegistry::new();
        registry
            .register(
                ClassMetadata::new("User")
                    .with_property(prop("firstName", "string"))
                    .with_property(prop("age", "integer"))
                    .with_property(prop("nickName", "string").with_serialized_name("alias"))
                    .with_property(prop("pets", "ArrayCollection<Pet>")),
            )
            .register(
                ClassMetadata::new("Pet")
                    .with_property(prop("name", "string"))
                    .with_discriminator(Discriminator::new("kind", "Pet").with_mapping("dog", "Dog")),
            )
            .register(ClassMetadata::new("Dog").with_parent("Pet"))
            .register(ClassMetadata::new("Tag").with_property(prop("name", "string")));
        registry
    }

    fn builder() -> SerializerBuilder {
        Serializer::builder()
            .set_metadata_factory(registry())
            .configure_handlers(|handlers| {
                handlers.register_subscribing_handler(Arc::new(CollectionHandler::new(["ArrayCollection"])));
            })
    }

    fn serializer() -> Serializer {
        builder().build()
    }

    fn user() -> Value {
        let dog = ObjectRef::new("Dog");
        dog.set("name", Value::from("Rex"));

        let user = ObjectRef::new("User");
        user.set("firstName", Value::from("Ann"));
        user.set("age", Value::Integer(41));
        user.set("nickName", Value::from("annie"));
        user.set("pets", Value::List(vec![Value::Object(dog)]));
        Value::Object(user)
    }

    #[test]
    fn json_end_to_end() {
        let serializer = serializer();

        let text = serializer.serialize(&user(), "json", ContextOptions::new()).unwrap();
        assert_eq!(
            text,
            r#"{"firstName":"Ann","age":41,"alias":"annie","pets":[{"kind":"dog","name":"Rex"}]}"#
        );

        let back = serializer.deserialize(&text, "User", "json", ContextOptions::new()).unwrap();
        let back = back.as_object().unwrap();
        assert_eq!(back.get("nickName"), Some(Value::from("annie")));

        let Some(Value::List(pets)) = back.get("pets") else {
            panic!("pets should be a list");
        };
        let pet = pets[0].as_object().unwrap();
        assert_eq!(pet.class_name(), "Dog");
        assert_eq!(pet.get("name"), Some(Value::from("Rex")));
    }

    #[test]
    fn naming_strategy_reaches_visitors() {
        let serializer = builder()
            .set_property_naming_strategy(SnakeCaseNaming::default())
            .build();

        let tree = serializer.to_value(&user(), ContextOptions::new()).unwrap();
        assert_eq!(tree.field("first_name"), Some(Value::from("Ann")));
        assert_eq!(tree.field("nick_name"), Some(Value::from("annie")));

        let text = r#"{"first_name":"Bo","age":"7"}"#;
        let back = serializer.deserialize(text, "User", "json", ContextOptions::new()).unwrap();
        assert_eq!(back.as_object().unwrap().get("age"), Some(Value::Integer(7)));
    }

    #[test]
    fn value_round_trip() {
        let serializer = serializer();
        let tree = serializer.to_value(&user(), ContextOptions::new()).unwrap();
        let back = serializer.from_value(&tree, "User", ContextOptions::new()).unwrap();

        assert_eq!(back.as_object().unwrap().get("age"), Some(Value::Integer(41)));
    }

    fn tag_name(value: &Value) -> Option<Value> {
        value.as_object().and_then(|tag| tag.get("name"))
    }

    #[test]
    fn list_of_objects_at_the_root() {
        let serializer = serializer();

        let text = r#"[{"name":"a"},{"name":"b"}]"#;
        let Value::List(tags) = serializer
            .deserialize(text, "array<Tag>", "json", ContextOptions::new())
            .unwrap()
        else {
            panic!("expected a list");
        };
        assert_eq!(tags.len(), 2);
        assert_eq!(tag_name(&tags[1]), Some(Value::from("b")));

        let tree = Value::List(vec![Value::Map([("name", Value::from("c"))].into_iter().collect())]);
        let Value::List(tags) = serializer
            .from_value(&tree, "array<Tag>", ContextOptions::new())
            .unwrap()
        else {
            panic!("expected a list");
        };
        assert_eq!(tags.len(), 1);
        assert_eq!(tag_name(&tags[0]), Some(Value::from("c")));
    }

    #[test]
    fn map_of_objects_at_the_root() {
        let serializer = serializer();

        let text = r#"{"x":{"name":"a"},"y":{"name":"b"}}"#;
        let back = serializer
            .deserialize(text, "array<string, Tag>", "json", ContextOptions::new())
            .unwrap();
        let tags = back.as_map().unwrap();
        assert_eq!(tags.keys().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(tags.get("y").and_then(tag_name), Some(Value::from("b")));

        let tree = serializer.to_value(&back, ContextOptions::new()).unwrap();
        let again = serializer
            .from_value(&tree, "array<string, Tag>", ContextOptions::new())
            .unwrap();
        let tags = again.as_map().unwrap();
        assert_eq!(tags.get("x").and_then(tag_name), Some(Value::from("a")));
    }

    #[test]
    fn serialize_null_option() {
        let user = ObjectRef::new("User");
        user.set("firstName", Value::Null);
        let user = Value::Object(user);
        let serializer = serializer();

        let text = serializer.serialize(&user, "json", ContextOptions::new()).unwrap();
        assert_eq!(text, "{}");

        let options = ContextOptions::new().with_serialize_null(true);
        let text = serializer.serialize(&user, "json", options).unwrap();
        assert_eq!(text, r#"{"firstName":null,"age":null,"alias":null,"pets":null}"#);
    }

    #[test]
    fn unsupported_format() {
        let serializer = serializer();
        assert!(!serializer.supports_format(Direction::Serialization, "xml"));

        let err = serializer.serialize(&user(), "xml", ContextOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedFormat { ref format, direction: Direction::Serialization } if format == "xml"
        ));

        let err = serializer
            .deserialize("<user/>", "User", "xml", ContextOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { direction: Direction::Deserialization, .. }));
    }

    #[test]
    fn custom_visitor_keeps_defaults_only_on_request() {
        let pretty = |naming: Arc<dyn PropertyNamingStrategy>| -> Box<dyn Visitor> {
            Box::new(JsonSerializationVisitor::with_format(naming, Json::pretty()))
        };

        let serializer = Serializer::builder().set_serialization_visitor("pretty", pretty).build();
        assert!(serializer.supports_format(Direction::Serialization, "pretty"));
        assert!(!serializer.supports_format(Direction::Serialization, "json"));

        let serializer = Serializer::builder()
            .set_serialization_visitor("pretty", pretty)
            .add_default_visitors()
            .build();
        assert!(serializer.supports_format(Direction::Serialization, "json"));

        let list = Value::List(vec![Value::Integer(1)]);
        let text = serializer.serialize(&list, "pretty", ContextOptions::new()).unwrap();
        assert_eq!(text, String::from("[\n  1\n]"));
    }

    #[test]
    fn malformed_input() {
        let err = serializer()
            .deserialize("{", "User", "json", ContextOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        let err = serializer()
            .deserialize("{}", "array<", "json", ContextOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::TypeParse { .. }));
    }
}
