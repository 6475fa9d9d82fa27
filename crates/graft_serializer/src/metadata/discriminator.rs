use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Discriminator

/// Polymorphic class selection for a class hierarchy.
///
/// The serialized form carries `field_name`, whose value picks the concrete
/// class out of `map` when deserializing into `base_class`. A discriminator
/// always has a field and a base class, so a non-empty map without them
/// cannot be expressed.
///
/// The same discriminator is usually attached to the base class and to every
/// mapped subclass.
///
/// # Examples
///
/// ```
/// use graft_serializer::metadata::Discriminator;
///
/// let discriminator = Discriminator::new("type", "Animal")
///     .with_mapping("dog", "Dog")
///     .with_mapping("cat", "Cat");
///
/// assert_eq!(discriminator.class_for("cat"), Some("Cat"));
/// assert_eq!(discriminator.value_for("Dog"), Some("dog"));
/// assert_eq!(discriminator.available(), "dog, cat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    field_name: String,
    base_class: String,
    map: Vec<(String, String)>,
    value: Option<String>,
}

impl Discriminator {
    pub fn new(field_name: impl Into<String>, base_class: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            base_class: base_class.into(),
            map: Vec::new(),
            value: None,
        }
    }

    /// Maps a discriminator value to a concrete class.
    ///
    /// Re-mapping a value replaces its class and keeps its position.
    pub fn with_mapping(mut self, value: impl Into<String>, class: impl Into<String>) -> Self {
        let value = value.into();
        let class = class.into();
        match self.map.iter_mut().find(|(v, _)| *v == value) {
            Some(entry) => entry.1 = class,
            None => self.map.push((value, class)),
        }
        self
    }

    /// Fixes the value written for the class carrying this discriminator.
    ///
    /// Without it the value is looked up in the map by class name.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[inline]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    #[inline]
    pub fn base_class(&self) -> &str {
        &self.base_class
    }

    /// Value to class mappings in declaration order.
    #[inline]
    pub fn map(&self) -> &[(String, String)] {
        &self.map
    }

    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The class mapped to `value`.
    pub fn class_for(&self, value: &str) -> Option<&str> {
        self.map
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, class)| class.as_str())
    }

    /// The value to write for an instance of `class`.
    pub fn value_for(&self, class: &str) -> Option<&str> {
        if let Some(value) = &self.value {
            return Some(value);
        }
        self.map
            .iter()
            .find(|(_, c)| c == class)
            .map(|(value, _)| value.as_str())
    }

    /// The mapped values, comma separated, in declaration order.
    pub fn available(&self) -> String {
        let mut out = String::new();
        for (index, (value, _)) in self.map.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            out.push_str(value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Discriminator;

    #[test]
    fn remapping_keeps_position() {
        let discriminator = Discriminator::new("kind", "Shape")
            .with_mapping("circle", "Circle")
            .with_mapping("square", "Square")
            .with_mapping("circle", "Disc");

        assert_eq!(discriminator.available(), "circle, square");
        assert_eq!(discriminator.class_for("circle"), Some("Disc"));
        assert_eq!(discriminator.class_for("triangle"), None);
    }

    #[test]
    fn explicit_value_wins() {
        let discriminator = Discriminator::new("kind", "Shape")
            .with_mapping("circle", "Circle")
            .with_value("round");
        assert_eq!(discriminator.value_for("Circle"), Some("round"));
    }
}
