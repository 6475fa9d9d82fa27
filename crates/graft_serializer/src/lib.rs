//! Metadata-driven serialization of dynamic object graphs.
//!
//! A [`GraphNavigator`](navigator::GraphNavigator) walks a [`Value`](value::Value)
//! graph depth first. For every node it resolves the effective
//! [`TypeDescriptor`](types::TypeDescriptor), then either visits it as a
//! scalar, hands it to a custom handler from the
//! [`HandlerRegistry`](handler::HandlerRegistry), or drives a
//! [`Visitor`](visitor::Visitor) through the class's
//! [`ClassMetadata`](metadata::ClassMetadata). Per-call state (cycle guard,
//! metadata stack, depth) lives in a [`Context`](context::Context).
//!
//! # Type strings
//!
//! Types are written `name<param, ...>`. The scalar names are `NULL`,
//! `string`, `integer`, `boolean`, `double` (`float` is an alias), `array`
//! and `resource`; anything else names a class or a handler type.
//!
//! `array` selects its shape from the number of parameters:
//!
//! | Type                  | Shape                              |
//! |-----------------------|------------------------------------|
//! | `array`               | untyped, elements inferred         |
//! | `array<V>`            | list of `V`                        |
//! | `array<K, V>`         | map of `V` keyed by `K`            |
//! | `array<A, B, C>`      | error                              |
//!
//! # Features
//!
//! - `std` (default): link the standard library.
//! - `json` (default): JSON visitors, registered by default on
//!   [`Serializer`].
//! - `debug`: errors raised inside class nodes carry the class metadata stack.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod construction;
pub mod context;
pub mod event;
pub mod exclusion;
pub mod handler;
pub mod metadata;
pub mod naming;
pub mod navigator;
pub mod serializer;
pub mod types;
pub mod value;
pub mod visitor;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::{Error, Result};
pub use serializer::{Serializer, SerializerBuilder};
