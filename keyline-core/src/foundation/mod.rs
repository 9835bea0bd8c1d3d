//! Shared primitives: frame indexing, frame rates, errors, kurbo re-exports.
#![allow(missing_docs)]

pub mod core;
pub mod error;
