//! Property naming strategies: the key a property is written under.

use alloc::string::String;

use crate::metadata::PropertyMetadata;

/// Maps a property to its serialized key.
pub trait PropertyNamingStrategy: Send + Sync {
    fn translate_name(&self, property: &PropertyMetadata) -> String;
}

/// Uses the property name unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdenticalNaming;

impl PropertyNamingStrategy for IdenticalNaming {
    #[inline]
    fn translate_name(&self, property: &PropertyMetadata) -> String {
        String::from(property.name())
    }
}

/// Uses the explicit serialized name when one is set, else the delegate.
///
/// # Examples
///
/// ```
/// use graft_serializer::metadata::PropertyMetadata;
/// use graft_serializer::naming::{PropertyNamingStrategy, SerializedNameNaming, SnakeCaseNaming};
///
/// let naming = SerializedNameNaming::new(SnakeCaseNaming::default());
/// assert_eq!(naming.translate_name(&PropertyMetadata::new("firstName")), "first_name");
/// assert_eq!(naming.translate_name(&PropertyMetadata::new("id").with_serialized_name("ID")), "ID");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SerializedNameNaming<N = IdenticalNaming> {
    delegate: N,
}

impl<N: PropertyNamingStrategy> SerializedNameNaming<N> {
    #[inline]
    pub const fn new(delegate: N) -> Self {
        Self { delegate }
    }
}

impl<N: PropertyNamingStrategy> PropertyNamingStrategy for SerializedNameNaming<N> {
    fn translate_name(&self, property: &PropertyMetadata) -> String {
        match property.serialized_name() {
            Some(name) => String::from(name),
            None => self.delegate.translate_name(property),
        }
    }
}

/// Splits camel case names on upper-case letters: `firstName` becomes
/// `first_name`.
#[derive(Debug, Clone, Copy)]
pub struct SnakeCaseNaming {
    separator: char,
    lowercase: bool,
}

impl Default for SnakeCaseNaming {
    #[inline]
    fn default() -> Self {
        Self::new('_', true)
    }
}

impl SnakeCaseNaming {
    #[inline]
    pub const fn new(separator: char, lowercase: bool) -> Self {
        Self {
            separator,
            lowercase,
        }
    }
}

impl PropertyNamingStrategy for SnakeCaseNaming {
    fn translate_name(&self, property: &PropertyMetadata) -> String {
        let name = property.name();
        let mut out = String::with_capacity(name.len() + 4);
        for (index, c) in name.char_indices() {
            if c.is_ascii_uppercase() && index > 0 {
                out.push(self.separator);
            }
            if self.lowercase {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{IdenticalNaming, PropertyNamingStrategy, SnakeCaseNaming};
    use crate::metadata::PropertyMetadata;

    #[test]
    fn snake_case() {
        let naming = SnakeCaseNaming::default();
        let name = |n: &str| naming.translate_name(&PropertyMetadata::new(n));

        assert_eq!(name("createdAt"), "created_at");
        assert_eq!(name("Owner"), "owner");
        assert_eq!(name("already_snake"), "already_snake");
        assert_eq!(SnakeCaseNaming::new('-', false).translate_name(&PropertyMetadata::new("zipCode")), "zip-Code");
    }

    #[test]
    fn identical_ignores_serialized_name() {
        let property = PropertyMetadata::new("id").with_serialized_name("ID");
        assert_eq!(IdenticalNaming.translate_name(&property), "id");
    }
}
