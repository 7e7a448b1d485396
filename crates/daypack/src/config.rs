//! Configuration types for Daypack layouts.
//!
//! This module provides configuration structures that control how a day of
//! events is normalised, packed and placed on the timeline. All types
//! implement [`serde::Deserialize`] for loading from external sources; every
//! field is optional and falls back to the agenda defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and timeline settings.
//! - [`LayoutConfig`] - Vertical scale, gutter and the handling of odd durations.
//! - [`TimelineConfig`] - Displayed hour range and screen dimensions.
//!
//! # Example
//!
//! ```
//! # use daypack::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     hour_height = 60.0
//!     duration_policy = "clamp"
//!
//!     [timeline]
//!     first_hour = 7
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().hour_height(), 60.0);
//! assert_eq!(config.timeline().first_hour(), 7);
//! assert_eq!(config.timeline().last_hour(), 24);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use crate::{
    error::DaypackError,
    layout::{DEFAULT_GUTTER, DEFAULT_HOUR_HEIGHT},
    normalize::DurationPolicy,
};

/// Top-level configuration combining layout and timeline settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Timeline configuration section.
    #[serde(default)]
    timeline: TimelineConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and timeline configurations.
    pub fn new(layout: LayoutConfig, timeline: TimelineConfig) -> Self {
        Self { layout, timeline }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the timeline configuration.
    pub fn timeline(&self) -> &TimelineConfig {
        &self.timeline
    }

    /// Overrides the screen width, e.g. after a resize.
    pub fn with_screen_width(mut self, screen_width: f32) -> Self {
        self.timeline.screen_width = screen_width;
        self
    }

    /// Overrides the first displayed hour.
    pub fn with_first_hour(mut self, first_hour: u32) -> Self {
        self.timeline.first_hour = first_hour;
        self
    }

    /// Checks that the configuration describes a usable timeline.
    ///
    /// # Errors
    ///
    /// Returns [`DaypackError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), DaypackError> {
        let layout = &self.layout;
        let timeline = &self.timeline;

        let lengths = [
            ("hour_height", layout.hour_height),
            ("gutter", layout.gutter),
            ("time_column_width", timeline.time_column_width),
            ("screen_width", timeline.screen_width),
        ];
        if let Some((name, value)) = lengths.iter().find(|(_, value)| !value.is_finite()) {
            return Err(DaypackError::Config(format!(
                "{name} must be a finite number, got {value}"
            )));
        }

        if layout.hour_height <= 0.0 {
            return Err(DaypackError::Config(format!(
                "hour_height must be positive, got {}",
                layout.hour_height
            )));
        }

        if layout.gutter < 0.0 {
            return Err(DaypackError::Config(format!(
                "gutter must not be negative, got {}",
                layout.gutter
            )));
        }

        if layout.default_duration_minutes == 0 {
            return Err(DaypackError::Config(
                "default_duration_minutes must be positive".to_string(),
            ));
        }

        if layout.duration_policy == DurationPolicy::Clamp && layout.min_duration_minutes == 0 {
            return Err(DaypackError::Config(
                "min_duration_minutes must be positive when clamping".to_string(),
            ));
        }

        if timeline.last_hour > 24 || timeline.first_hour >= timeline.last_hour {
            return Err(DaypackError::Config(format!(
                "hour range {}..{} is not a valid part of a day",
                timeline.first_hour, timeline.last_hour
            )));
        }

        if timeline.screen_width <= timeline.time_column_width {
            return Err(DaypackError::Config(format!(
                "screen_width {} leaves no room beside the {} pixel time column",
                timeline.screen_width, timeline.time_column_width
            )));
        }

        if timeline.slot_minutes == 0 || 60 % timeline.slot_minutes != 0 {
            return Err(DaypackError::Config(format!(
                "slot_minutes must divide an hour evenly, got {}",
                timeline.slot_minutes
            )));
        }

        Ok(())
    }
}

/// Packing and normalisation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixels per hour.
    hour_height: f32,

    /// Horizontal inset subtracted from each box.
    gutter: f32,

    /// Duration given to events that have no end.
    default_duration_minutes: u32,

    /// Duration forced onto degenerate events under [`DurationPolicy::Clamp`].
    min_duration_minutes: u32,

    /// What to do with events whose end is not after their start.
    duration_policy: DurationPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hour_height: DEFAULT_HOUR_HEIGHT,
            gutter: DEFAULT_GUTTER,
            default_duration_minutes: 60,
            min_duration_minutes: 15,
            duration_policy: DurationPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Returns the vertical scale in pixels per hour.
    pub fn hour_height(&self) -> f32 {
        self.hour_height
    }

    /// Returns the gutter in pixels.
    pub fn gutter(&self) -> f32 {
        self.gutter
    }

    pub fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }

    pub fn min_duration_minutes(&self) -> u32 {
        self.min_duration_minutes
    }

    /// Returns the [`DurationPolicy`] applied before packing.
    pub fn duration_policy(&self) -> DurationPolicy {
        self.duration_policy
    }

    /// Sets the [`DurationPolicy`] and returns the modified configuration.
    pub fn with_duration_policy(mut self, duration_policy: DurationPolicy) -> Self {
        self.duration_policy = duration_policy;
        self
    }
}

/// Visible hour range and screen geometry of the day view.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// First displayed hour; events before it get a negative top.
    first_hour: u32,

    /// Hour at which the view ends, at most 24.
    last_hour: u32,

    /// Width of the hour label column to the left of the events.
    time_column_width: f32,

    /// Full width of the screen or window.
    screen_width: f32,

    /// Spacing of the minor grid lines.
    slot_minutes: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            first_hour: 0,
            last_hour: 24,
            time_column_width: 59.0,
            screen_width: 375.0,
            slot_minutes: 15,
        }
    }
}

impl TimelineConfig {
    pub fn first_hour(&self) -> u32 {
        self.first_hour
    }

    pub fn last_hour(&self) -> u32 {
        self.last_hour
    }

    pub fn time_column_width(&self) -> f32 {
        self.time_column_width
    }

    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> AppConfig {
        toml::from_str(source).expect("valid TOML configuration")
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.layout().hour_height(), DEFAULT_HOUR_HEIGHT);
        assert_eq!(config.layout().gutter(), DEFAULT_GUTTER);
        assert_eq!(config.layout().default_duration_minutes(), 60);
        assert_eq!(config.layout().min_duration_minutes(), 15);
        assert_eq!(config.layout().duration_policy(), DurationPolicy::Reject);
        assert_eq!(config.timeline().first_hour(), 0);
        assert_eq!(config.timeline().last_hour(), 24);
        assert_eq!(config.timeline().time_column_width(), 59.0);
        assert_eq!(config.timeline().slot_minutes(), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse("");

        assert_eq!(config.layout().hour_height(), DEFAULT_HOUR_HEIGHT);
        assert_eq!(config.timeline().screen_width(), 375.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse(
            r#"
            [layout]
            gutter = 4.0
            duration_policy = "pass_through"

            [timeline]
            last_hour = 20
            slot_minutes = 20
            "#,
        );

        assert_eq!(config.layout().gutter(), 4.0);
        assert_eq!(config.layout().hour_height(), DEFAULT_HOUR_HEIGHT);
        assert_eq!(
            config.layout().duration_policy(),
            DurationPolicy::PassThrough
        );
        assert_eq!(config.timeline().last_hour(), 20);
        assert_eq!(config.timeline().slot_minutes(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[layout]\nduration_policy = \"stretch\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_overrides() {
        let config = AppConfig::default().with_screen_width(f32::NAN);
        assert!(matches!(config.validate(), Err(DaypackError::Config(_))));

        let config = AppConfig::default().with_screen_width(f32::INFINITY);
        assert!(matches!(config.validate(), Err(DaypackError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_screen_width(1024.0)
            .with_first_hour(6);

        assert_eq!(config.timeline().screen_width(), 1024.0);
        assert_eq!(config.timeline().first_hour(), 6);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            "[layout]\nhour_height = 0.0",
            "[layout]\ngutter = -1.0",
            "[layout]\ndefault_duration_minutes = 0",
            "[layout]\nduration_policy = \"clamp\"\nmin_duration_minutes = 0",
            "[timeline]\nfirst_hour = 10\nlast_hour = 10",
            "[timeline]\nlast_hour = 25",
            "[timeline]\nscreen_width = 50.0",
            "[timeline]\nslot_minutes = 7",
            "[timeline]\nslot_minutes = 0",
            "[layout]\nhour_height = nan",
            "[layout]\nhour_height = inf",
            "[layout]\ngutter = nan",
            "[timeline]\nscreen_width = nan",
            "[timeline]\ntime_column_width = nan",
        ];

        for source in cases {
            let result = parse(source).validate();
            assert!(
                matches!(result, Err(DaypackError::Config(_))),
                "expected config error for {source:?}"
            );
        }
    }
}
