//! Type descriptors: what kind of value sits at a graph node.
//!
//! - [`TypeDescriptor`]: an immutable `name<params...>` tree.
//! - [`ScalarKind`]: the built-in type names that never reach class metadata.
//! - [`TypeDescriptor::parse`]: the textual declaration parser
//!   (`array<string, integer>`, `DateTime<'Y-m-d'>`).

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod parser;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::TypeDescriptor;
pub use scalar::ScalarKind;
