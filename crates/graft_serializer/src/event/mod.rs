//! Pre and post visit events.
//!
//! Listeners registered on an [`EventDispatcher`] run around the visit of
//! each class-typed node. A pre-visit listener may replace the node's data
//! and type before handler dispatch.

// -----------------------------------------------------------------------------
// Modules

mod dispatcher;
mod object_event;

// -----------------------------------------------------------------------------
// Exports

pub use dispatcher::{EventDispatcher, Listener};
pub use object_event::ObjectEvent;

use core::fmt;

/// Whether a hook runs before or after a node is visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pre,
    Post,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => f.write_str("pre"),
            Self::Post => f.write_str("post"),
        }
    }
}
