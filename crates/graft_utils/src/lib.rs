#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

//! Shared utilities for the graft crates.

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
