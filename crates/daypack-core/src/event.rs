//! Timed events and the hour arithmetic used to place them.
//!
//! An [`Event`] is a wall-clock interval plus an opaque payload. Layout only
//! ever reads `start` and `end`; the payload travels through untouched so the
//! caller can correlate a positioned box with its own record.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

const SECONDS_PER_HOUR: f32 = 3600.0;

/// A single timed event.
///
/// Intervals are half-open: an event ending at 10:00 and another starting at
/// 10:00 do not overlap.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use daypack_core::event::Event;
/// let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let standup = Event::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(9, 30, 0).unwrap(),
///     "standup",
/// );
///
/// assert_eq!(standup.duration_hours(), 0.5);
/// assert_eq!(*standup.payload(), "standup");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<P = ()> {
    start: NaiveDateTime,
    end: NaiveDateTime,
    payload: P,
}

impl<P> Event<P> {
    /// Creates a new event. No ordering between `start` and `end` is enforced.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, payload: P) -> Self {
        Self {
            start,
            end,
            payload,
        }
    }

    /// Returns the start instant
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the end instant
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns a reference to the payload
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the event and returns its payload
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Sets the end instant and returns the modified event
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = end;
        self
    }

    /// Returns `end - start`, negative for inverted intervals
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }

    /// Returns the duration in fractional hours
    pub fn duration_hours(&self) -> f32 {
        hours_between(self.start, self.end)
    }

    /// Returns true if the event does not span a positive amount of time
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open interval intersection test.
    ///
    /// A zero-length event never overlaps anything, not even another
    /// zero-length event at the same instant.
    pub fn overlaps<Q>(&self, other: &Event<Q>) -> bool {
        self.end > other.start && self.start < other.end
    }
}

/// Returns the signed number of hours from `from` to `to`.
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f32 {
    let delta = to.signed_duration_since(from);
    delta.num_milliseconds() as f32 / 1000.0 / SECONDS_PER_HOUR
}

/// Returns the hours elapsed since midnight of the instant's own day.
///
/// The date is discarded, so 09:30 on any day yields `9.5`.
pub fn hours_since_midnight(instant: NaiveDateTime) -> f32 {
    instant.num_seconds_from_midnight() as f32 / SECONDS_PER_HOUR
}
