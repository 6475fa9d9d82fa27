//! Class and property metadata read by the navigator.
//!
//! Metadata is built once, registered in a [`MetadataFactory`] and shared
//! read-only by every call.

// -----------------------------------------------------------------------------
// Modules

mod class;
mod discriminator;
mod property;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use class::{ClassMetadata, LifecycleCallback};
pub use discriminator::Discriminator;
pub use property::PropertyMetadata;
pub use registry::{MetadataFactory, MetadataRegistry};
