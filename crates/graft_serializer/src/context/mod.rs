//! Per-call traversal state.
//!
//! A [`Context`] is created for each top-level call and threaded through the
//! whole traversal as `&mut Context`. It owns the cycle guard, the class and
//! property stacks, and the depth counter.

// -----------------------------------------------------------------------------
// Modules

mod direction;
mod metadata_stack;
mod options;
mod traversal;

// -----------------------------------------------------------------------------
// Exports

pub use direction::Direction;
pub use metadata_stack::MetadataStack;
pub use options::ContextOptions;
pub use traversal::Context;
