//! Metadata-driven object graph serialization.
//!
//! This crate bundles the workspace members:
//!
//! - [`utils`]: hash containers shared by the other crates.
//! - [`serializer`]: the graph navigator, handler registry, traversal context,
//!   format visitors and the [`Serializer`](serializer::Serializer) facade.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use graft_serializer as serializer;
pub use graft_utils as utils;
