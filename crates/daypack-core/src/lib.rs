//! Daypack Core Types
//!
//! This crate provides the foundational types shared by the Daypack layout
//! engine and its front-ends. It includes:
//!
//! - **Events**: Timed intervals with an opaque payload ([`event::Event`])
//! - **Geometry**: Pixel-space primitives ([`geometry`] module)
//! - **Positioned events**: Layout output records ([`positioned::PositionedEvent`])

pub mod event;
pub mod geometry;
pub mod positioned;
