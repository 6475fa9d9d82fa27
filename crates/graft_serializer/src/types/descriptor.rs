use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::types::ScalarKind;
use crate::value::Value;

// -----------------------------------------------------------------------------
// TypeDescriptor

/// An immutable, recursive type reference: a name plus ordered type parameters.
///
/// Scalar and class types have no parameters. For `array`, one parameter
/// denotes a homogeneous list (the element type) and two parameters denote a
/// map (key type, value type).
///
/// Equality and hashing are structural.
///
/// # Examples
///
/// ```
/// use graft_serializer::types::TypeDescriptor;
///
/// let ty: TypeDescriptor = "array<string, array<integer>>".parse().unwrap();
/// assert_eq!(ty.name(), "array");
/// assert_eq!(ty.params().len(), 2);
/// assert_eq!(ty.param(1).unwrap().param(0).unwrap().name(), "integer");
/// assert_eq!(ty.to_string(), "array<string, array<integer>>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    params: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Creates a parameterless descriptor.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Creates a descriptor with type parameters.
    #[inline]
    pub fn with_params(name: impl Into<Cow<'static, str>>, params: Vec<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// The null type, forced onto every `null` value during serialization.
    #[inline]
    pub const fn null() -> Self {
        Self::scalar(ScalarKind::Null)
    }

    /// A parameterless descriptor for a built-in scalar kind.
    #[inline]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self {
            name: Cow::Borrowed(kind.name()),
            params: Vec::new(),
        }
    }

    /// `array<element>`.
    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::with_params(ScalarKind::ARRAY, alloc::vec![element])
    }

    /// `array<key, value>`.
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::with_params(ScalarKind::ARRAY, alloc::vec![key, value])
    }

    /// Parses a textual type declaration.
    ///
    /// See the [module documentation](crate::types) for the grammar.
    #[inline]
    pub fn parse(input: &str) -> Result<Self, Error> {
        super::parser::parse(input)
    }

    /// Infers the most specific descriptor for a runtime value.
    ///
    /// Objects resolve to their concrete class; lists and maps to an
    /// unparameterised `array`.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Object(object) => Self::new(alloc::string::String::from(object.class_name())),
            Value::Null => Self::scalar(ScalarKind::Null),
            Value::Bool(_) => Self::scalar(ScalarKind::Boolean),
            Value::Integer(_) => Self::scalar(ScalarKind::Integer),
            Value::Double(_) => Self::scalar(ScalarKind::Double),
            Value::String(_) => Self::scalar(ScalarKind::String),
            Value::List(_) | Value::Map(_) => Self::scalar(ScalarKind::Array),
            Value::Opaque(_) => Self::scalar(ScalarKind::Resource),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    #[inline]
    pub fn param(&self, index: usize) -> Option<&TypeDescriptor> {
        self.params.get(index)
    }

    #[inline]
    pub fn has_param(&self, index: usize) -> bool {
        index < self.params.len()
    }

    /// The built-in scalar kind named by this descriptor, if any.
    #[inline]
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        ScalarKind::from_name(&self.name)
    }

    /// Returns a descriptor with the same parameters under another name.
    ///
    /// Collection handlers use this to re-type a wrapper as `array`.
    pub fn renamed(&self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            params: self.params.clone(),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ScalarKind> for TypeDescriptor {
    #[inline]
    fn from(kind: ScalarKind) -> Self {
        Self::scalar(kind)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        let mut iter = self.params.iter();
        if let Some(first) = iter.next() {
            f.write_str("<")?;
            first.fmt_param(f)?;
            for param in iter {
                f.write_str(", ")?;
                param.fmt_param(f)?;
            }
            f.write_str(">")?;
        }

        Ok(())
    }
}

impl TypeDescriptor {
    // Literal parameters (`'Y-m-d'`) are written back quoted.
    fn fmt_param(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() && !super::parser::is_plain_name(&self.name) {
            write!(f, "'{}'", self.name)
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::TypeDescriptor;
    use crate::types::ScalarKind;

    #[test]
    fn structural_equality() {
        let a = TypeDescriptor::map_of(
            TypeDescriptor::scalar(ScalarKind::String),
            TypeDescriptor::new("Money"),
        );
        let b = TypeDescriptor::parse("array<string,Money>").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, TypeDescriptor::list_of(TypeDescriptor::new("Money")));
    }

    #[test]
    fn display_quotes_literals() {
        let ty = TypeDescriptor::with_params("DateTime", alloc::vec![TypeDescriptor::new("Y-m-d")]);
        assert_eq!(ty.to_string(), "DateTime<'Y-m-d'>");
        assert_eq!(TypeDescriptor::parse(&ty.to_string()).unwrap(), ty);
    }

    #[test]
    fn renamed_keeps_params() {
        let ty = TypeDescriptor::parse("ArrayCollection<Item>").unwrap();
        let array = ty.renamed(ScalarKind::ARRAY);
        assert_eq!(array.to_string(), "array<Item>");
    }
}
