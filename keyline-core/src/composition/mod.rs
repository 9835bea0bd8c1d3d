//! The composition data model: layers, the layer arena, and immutable edits.

pub mod demo;
pub mod model;
pub mod mutate;
