//! Error types for Daypack operations.
//!
//! This module provides the main error type [`DaypackError`] which wraps
//! the conditions that can occur around a layout run. The layout pass itself
//! never fails; errors come from reading input, loading configuration, and
//! the duration policy applied before layout.

use std::{io, ops::Range};

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for Daypack operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text and, when known, the byte range
/// the problem was found at, so front-ends can point at the offending input.
#[derive(Debug, Error)]
pub enum DaypackError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("{message}")]
    Parse {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event #{index} ends at {end} which is not after its start {start}")]
    InvalidEvent {
        index: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Output error: {0}")]
    Output(String),
}

impl DaypackError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(
        message: impl Into<String>,
        src: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            src: src.into(),
            span,
        }
    }

    /// Create a new `InvalidEvent` error for the event at `index`.
    pub fn new_invalid_event(index: usize, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::InvalidEvent { index, start, end }
    }
}
