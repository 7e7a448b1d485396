//! Daypack - side-by-side layout of overlapping events on a day timeline.
//!
//! Given the events of one day, Daypack computes a box for each of them so
//! that events overlapping in time are shown next to each other rather than
//! stacked. The [`layout`] module holds the packing engine; the
//! [`TimelineBuilder`] wraps it with configuration, input normalisation and
//! the vertical metrics of the day view.

pub mod config;
pub mod layout;
pub mod normalize;
pub mod timeline;

mod error;

pub use daypack_core::{event::Event, geometry, positioned::PositionedEvent};

pub use error::DaypackError;

use log::{debug, info, trace};

use config::AppConfig;
use layout::Packer;
use normalize::Draft;
use timeline::{GridLine, Timeline};

/// The packed events of one day plus the metrics of its timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout<P> {
    events: Vec<PositionedEvent<P>>,
    timeline: Timeline,
    height: f32,
    initial_scroll: f32,
    grid: Vec<GridLine>,
}

impl<P> DayLayout<P> {
    /// Returns the positioned events, group by group in time order
    pub fn events(&self) -> &[PositionedEvent<P>] {
        &self.events
    }

    /// Consumes the layout and returns the positioned events
    pub fn into_events(self) -> Vec<PositionedEvent<P>> {
        self.events
    }

    /// Returns the timeline the events were laid out on
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Returns the total height of the displayed hour range
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the scroll offset that brings the earliest event into view
    pub fn initial_scroll(&self) -> f32 {
        self.initial_scroll
    }

    /// Returns the hour and slot lines of the timeline
    pub fn grid(&self) -> &[GridLine] {
        &self.grid
    }
}

/// Builder for laying out a day of events.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use daypack::{TimelineBuilder, config::AppConfig, normalize::Draft};
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
///
/// let builder = TimelineBuilder::new(AppConfig::default().with_screen_width(359.0));
/// let day_layout = builder
///     .layout_day(vec![
///         Draft::new(at(9, 0), Some(at(10, 0)), "review"),
///         Draft::new(at(9, 30), None, "call"),
///     ])
///     .expect("valid events");
///
/// assert_eq!(day_layout.events().len(), 2);
/// assert_eq!(day_layout.events()[1].left(), 150.0);
/// assert_eq!(day_layout.height(), 2400.0);
/// ```
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    config: AppConfig,
}

impl TimelineBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Create the packer described by the configuration.
    pub fn packer(&self) -> Packer {
        let layout = self.config.layout();
        let timeline = Timeline::from_config(&self.config);

        Packer::new(timeline.content_width(self.config.timeline().screen_width()))
            .with_day_start_hour(timeline.first_hour() as f32)
            .with_hour_height(layout.hour_height())
            .with_gutter(layout.gutter())
    }

    /// Normalise and lay out a day of events.
    ///
    /// # Errors
    ///
    /// Returns `DaypackError` for an invalid configuration, or for events the
    /// configured duration policy refuses.
    pub fn layout_day<P>(&self, drafts: Vec<Draft<P>>) -> Result<DayLayout<P>, DaypackError> {
        self.config.validate()?;

        info!(events_count = drafts.len(); "Laying out day");
        let events = normalize::normalize(drafts, self.config.layout())?;
        debug!("Events normalised");

        let packer = self.packer();
        trace!(packer:?; "Using packer");
        let events = packer.pack(events);

        let timeline = Timeline::from_config(&self.config);
        let initial_scroll = timeline.initial_scroll(&events);
        let grid = timeline.grid_lines(self.config.timeline().slot_minutes());

        info!(
            events_count = events.len(),
            initial_scroll;
            "Day laid out"
        );

        Ok(DayLayout {
            events,
            height: timeline.height(),
            timeline,
            initial_scroll,
            grid,
        })
    }
}
