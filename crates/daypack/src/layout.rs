//! Event layout engine.
//!
//! Computes a non-overlapping 2D layout for the events of a single day:
//! overlap grouping and column placement live in `bunch`, pixel geometry in
//! [`Packer`].

mod bunch;
mod packer;

pub use packer::{DEFAULT_GUTTER, DEFAULT_HOUR_HEIGHT, Packer, layout};
