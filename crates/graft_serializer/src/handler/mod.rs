//! Custom per-type handlers that pre-empt metadata-driven traversal.
//!
//! A handler found for a node's (direction, type, format) owns the node: the
//! navigator calls it and returns its result without loading metadata.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod registry;
mod subscribing;

// -----------------------------------------------------------------------------
// Exports

pub use collection::CollectionHandler;
pub use registry::HandlerRegistry;
pub use subscribing::{SubscribingHandler, Subscription};

use alloc::sync::Arc;

use crate::context::Context;
use crate::error::Result;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::visitor::Visitor;

/// A custom handler: visitor, node data, effective type and context in, node
/// result out.
pub type Handler =
    Arc<dyn Fn(&mut dyn Visitor, &Value, &TypeDescriptor, &mut Context<'_>) -> Result<Value> + Send + Sync>;
