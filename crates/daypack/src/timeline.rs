//! Vertical metrics of the day view around the packed events.
//!
//! The [`Timeline`] knows which hours are shown and how tall an hour is. It
//! derives the values a renderer needs next to the event boxes: the total
//! height, the hour and slot grid, where to scroll initially and where the
//! current-time indicator goes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use daypack_core::{
    geometry::{Bounds, Point},
    positioned::PositionedEvent,
};

use crate::config::AppConfig;

/// Kind of a horizontal grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLineKind {
    /// Full hour, labelled
    Hour,
    /// Subdivision inside an hour
    Slot,
}

/// A horizontal line of the hour grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    hour: u32,
    minute: u32,
    y: f32,
    kind: GridLineKind,
}

impl GridLine {
    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Offset from the top of the timeline
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn kind(&self) -> GridLineKind {
        self.kind
    }
}

/// The displayed hour range of a day view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    first_hour: u32,
    last_hour: u32,
    hour_height: f32,
    time_column_width: f32,
}

impl Timeline {
    /// Create a timeline showing `first_hour..last_hour`
    pub fn new(first_hour: u32, last_hour: u32, hour_height: f32) -> Self {
        Self {
            first_hour,
            last_hour,
            hour_height,
            time_column_width: 0.0,
        }
    }

    /// Build the timeline described by a configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let timeline = config.timeline();
        Self::new(
            timeline.first_hour(),
            timeline.last_hour(),
            config.layout().hour_height(),
        )
        .with_time_column_width(timeline.time_column_width())
    }

    /// Set the width of the hour label column left of the events
    pub fn with_time_column_width(mut self, width: f32) -> Self {
        self.time_column_width = width;
        self
    }

    pub fn first_hour(&self) -> u32 {
        self.first_hour
    }

    pub fn last_hour(&self) -> u32 {
        self.last_hour
    }

    /// Total height of the displayed hour range
    pub fn height(&self) -> f32 {
        self.last_hour.saturating_sub(self.first_hour) as f32 * self.hour_height
    }

    /// Width available to the packer on a screen `screen_width` wide
    pub fn content_width(&self, screen_width: f32) -> f32 {
        screen_width - self.time_column_width
    }

    /// Move a packed box from content space to screen space
    pub fn to_screen(&self, bounds: Bounds) -> Bounds {
        bounds.translate(Point::new(self.time_column_width, 0.0))
    }

    /// Grid lines from the first to the last hour, inclusive.
    ///
    /// Every hour gets an [`GridLineKind::Hour`] line; every hour but the
    /// last is subdivided by [`GridLineKind::Slot`] lines `slot_minutes`
    /// apart. A `slot_minutes` of zero or sixty and above yields hour lines
    /// only.
    pub fn grid_lines(&self, slot_minutes: u32) -> Vec<GridLine> {
        let mut lines = Vec::new();

        for hour in self.first_hour..=self.last_hour {
            let y = (hour - self.first_hour) as f32 * self.hour_height;
            lines.push(GridLine {
                hour,
                minute: 0,
                y,
                kind: GridLineKind::Hour,
            });

            if hour == self.last_hour || slot_minutes == 0 {
                continue;
            }

            for minute in (slot_minutes..60).step_by(slot_minutes as usize) {
                lines.push(GridLine {
                    hour,
                    minute,
                    y: y + minute as f32 / 60.0 * self.hour_height,
                    kind: GridLineKind::Slot,
                });
            }
        }

        lines
    }

    /// Scroll offset that shows the earliest event one hour below the top.
    ///
    /// Never negative; zero when there are no events.
    pub fn initial_scroll<P>(&self, events: &[PositionedEvent<P>]) -> f32 {
        events
            .iter()
            .map(PositionedEvent::top)
            .reduce(f32::min)
            .map_or(0.0, |top| (top - self.hour_height).max(0.0))
    }

    /// Offset of a wall-clock time from the top of the timeline
    pub fn current_time_offset(&self, now: NaiveTime) -> f32 {
        let hours = now.hour() as f32 - self.first_hour as f32;
        self.hour_height * hours + self.hour_height * now.minute() as f32 / 60.0
    }

    /// Offset of the current-time indicator, shown only on today's timeline
    pub fn indicator_offset(&self, shown_day: NaiveDate, now: NaiveDateTime) -> Option<f32> {
        (now.date() == shown_day).then(|| self.current_time_offset(now.time()))
    }
}
