//! Provides `PositionedEvent`, an event together with its pixel box.

use crate::{event::Event, geometry::Bounds};

/// An event placed on the timeline.
///
/// Carries the input event unchanged, the position it had in the caller's
/// input list, the column it was assigned within its overlap group, how many
/// columns its box spans, and the resulting pixel bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent<P = ()> {
    event: Event<P>,
    index: usize,
    column: usize,
    span: usize,
    column_count: usize,
    bounds: Bounds,
}

impl<P> PositionedEvent<P> {
    /// Construct a new `PositionedEvent`.
    pub fn new(
        event: Event<P>,
        index: usize,
        column: usize,
        span: usize,
        column_count: usize,
        bounds: Bounds,
    ) -> Self {
        Self {
            event,
            index,
            column,
            span,
            column_count,
            bounds,
        }
    }

    /// Position of the event in the original input list
    pub fn index(&self) -> usize {
        self.index
    }

    /// Column assigned within the event's overlap group
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of columns the box is widened across
    pub fn span(&self) -> usize {
        self.span
    }

    /// Total number of columns in the event's overlap group
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Vertical offset from the first displayed hour
    pub fn top(&self) -> f32 {
        self.bounds.min_y()
    }

    /// Horizontal offset within the layout width
    pub fn left(&self) -> f32 {
        self.bounds.min_x()
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    /// Get the pixel bounds of this event
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Get a reference to the inner event
    pub fn event(&self) -> &Event<P> {
        &self.event
    }

    /// Consumes the positioned event and returns the inner event
    pub fn into_event(self) -> Event<P> {
        self.event
    }
}
