use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::context::Direction;
use crate::types::TypeDescriptor;

/// A specialized `Result` type for graph traversal.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that abort a top-level serialize or deserialize call.
///
/// None of them are recovered inside the navigator; cycle-guard and exclusion
/// outcomes are not errors and never surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    // ---- input ----------------------------------------------------------
    #[error("the type must be given for all properties when deserializing")]
    MissingType,

    #[error(
        "the discriminator field name `{field}` for base-class `{class}` was not found in input data"
    )]
    DiscriminatorFieldNotFound { field: String, class: String },

    #[error(
        "the type value `{value}` does not exist in the discriminator map of class `{class}`. Available types: {available}"
    )]
    UnknownDiscriminatorValue {
        value: String,
        class: String,
        available: String,
    },

    #[error("expected {expected}, but got {found}")]
    InvalidValue {
        expected: &'static str,
        found: String,
    },

    // ---- configuration --------------------------------------------------
    #[error("you must define a type for `{class}::{property}`")]
    MissingPropertyType { class: String, property: String },

    #[error("array type cannot have more than 2 parameters, but got `{0}`")]
    TooManyArrayParams(TypeDescriptor),

    #[error("the direction `{0}` does not exist, expected `serialization` or `deserialization`")]
    UnknownDirection(String),

    #[error("handler method `{method}` registered for `{type_name}` is not provided by its handler")]
    UnknownHandlerMethod { method: String, type_name: String },

    #[error("the format `{format}` is not supported for {direction}")]
    UnsupportedFormat { format: String, direction: Direction },

    #[error("no metadata found for class `{0}`")]
    UnknownClass(String),

    #[error("invalid type declaration `{input}`: {reason}")]
    TypeParse { input: String, reason: &'static str },

    // ---- unsupported value ----------------------------------------------
    #[error("resources are not supported in serialized data. Path: {path}")]
    UnsupportedValue { path: String },

    // ---- wire -----------------------------------------------------------
    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Raised by handlers, listeners and visitors outside this crate.
    #[error("{0}")]
    Custom(String),

    /// An error annotated with the class metadata stack active when it was raised.
    #[error("{source} (stack:\n{stack})")]
    WithStack { source: Box<Error>, stack: String },
}

impl Error {
    /// Creates an [`Error::Custom`] from any displayable message.
    #[inline]
    pub fn custom(msg: impl core::fmt::Display) -> Self {
        Self::Custom(alloc::format!("{msg}"))
    }

    /// Returns the innermost error, looking through [`Error::WithStack`].
    pub fn root(&self) -> &Error {
        match self {
            Self::WithStack { source, .. } => source.root(),
            other => other,
        }
    }
}
