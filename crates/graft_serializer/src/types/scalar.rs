use core::fmt;

/// Built-in type names handled by the navigator's scalar fast path.
///
/// Anything else is treated as a class name (or a handler-only artificial
/// type) and goes through handler dispatch and metadata resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    String,
    Integer,
    Boolean,
    Double,
    Array,
    /// Host resources with no wire representation.
    Resource,
}

impl ScalarKind {
    pub const NULL: &'static str = "null";
    pub const STRING: &'static str = "string";
    pub const INTEGER: &'static str = "integer";
    pub const BOOLEAN: &'static str = "boolean";
    pub const DOUBLE: &'static str = "double";
    pub const FLOAT: &'static str = "float";
    pub const ARRAY: &'static str = "array";
    pub const RESOURCE: &'static str = "resource";

    /// Resolves a type name, accepting `float` as an alias of `double`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            Self::NULL => Some(Self::Null),
            Self::STRING => Some(Self::String),
            Self::INTEGER => Some(Self::Integer),
            Self::BOOLEAN => Some(Self::Boolean),
            Self::DOUBLE | Self::FLOAT => Some(Self::Double),
            Self::ARRAY => Some(Self::Array),
            Self::RESOURCE => Some(Self::Resource),
            _ => None,
        }
    }

    /// The canonical type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => Self::NULL,
            Self::String => Self::STRING,
            Self::Integer => Self::INTEGER,
            Self::Boolean => Self::BOOLEAN,
            Self::Double => Self::DOUBLE,
            Self::Array => Self::ARRAY,
            Self::Resource => Self::RESOURCE,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
