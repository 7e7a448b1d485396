//! Turning raw input records into well-formed events.
//!
//! Records coming from a file or a caller may lack an end, or carry an end
//! that is not after their start. The packer itself accepts anything; this
//! module decides what to do about such records before they reach it.

use chrono::{NaiveDateTime, TimeDelta};
use log::{debug, warn};
use serde::Deserialize;

use daypack_core::event::Event;

use crate::{config::LayoutConfig, error::DaypackError};

/// Handling of events whose end is not after their start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Hand the event to the packer unchanged; it gets a non-positive height.
    PassThrough,
    /// Fail with [`DaypackError::InvalidEvent`].
    #[default]
    Reject,
    /// Move the end to `start + min_duration_minutes`.
    Clamp,
}

/// An event as read from input, before its end is settled.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<P> {
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    payload: P,
}

impl<P> Draft<P> {
    pub fn new(start: NaiveDateTime, end: Option<NaiveDateTime>, payload: P) -> Self {
        Self {
            start,
            end,
            payload,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }
}

/// Settle the end of every draft according to `config`.
///
/// A missing end becomes `start + default_duration_minutes`. An end that is
/// not after the start is handled by the configured [`DurationPolicy`].
/// Input order is preserved so indices stay meaningful.
///
/// # Errors
///
/// Returns [`DaypackError::InvalidEvent`] for the first degenerate event
/// under [`DurationPolicy::Reject`], and [`DaypackError::Input`] if a
/// computed end falls outside the supported date range.
pub fn normalize<P>(
    drafts: Vec<Draft<P>>,
    config: &LayoutConfig,
) -> Result<Vec<Event<P>>, DaypackError> {
    let default_duration = TimeDelta::minutes(i64::from(config.default_duration_minutes()));
    let min_duration = TimeDelta::minutes(i64::from(config.min_duration_minutes()));
    let policy = config.duration_policy();

    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| -> Result<Event<P>, DaypackError> {
            let Draft {
                start,
                end,
                payload,
            } = draft;

            let end = match end {
                Some(end) => end,
                None => {
                    debug!(index; "Event has no end, using default duration");
                    offset(index, start, default_duration)?
                }
            };

            if end > start {
                return Ok(Event::new(start, end, payload));
            }

            match policy {
                DurationPolicy::PassThrough => Ok(Event::new(start, end, payload)),
                DurationPolicy::Reject => Err(DaypackError::new_invalid_event(index, start, end)),
                DurationPolicy::Clamp => {
                    let clamped = offset(index, start, min_duration)?;
                    warn!(
                        index,
                        start:? = start,
                        end:? = end,
                        clamped:? = clamped;
                        "Clamping event that does not end after its start"
                    );
                    Ok(Event::new(start, clamped, payload))
                }
            }
        })
        .collect()
}

fn offset(
    index: usize,
    start: NaiveDateTime,
    duration: TimeDelta,
) -> Result<NaiveDateTime, DaypackError> {
    start.checked_add_signed(duration).ok_or_else(|| {
        DaypackError::Input(format!(
            "event #{index}: {start} plus {} minutes is out of range",
            duration.num_minutes()
        ))
    })
}
