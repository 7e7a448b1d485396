//! Side-by-side packing of overlapping events.
//!
//! This module turns a list of timed events into pixel boxes for a single
//! day column. Overlapping events are split into columns so they are shown
//! next to each other instead of on top of each other.

use log::{debug, trace};

use daypack_core::{
    event::{Event, hours_between, hours_since_midnight},
    geometry::{Bounds, Point, Size},
    positioned::PositionedEvent,
};

use super::bunch::{Bunch, Placement, Tagged};

/// Pixels per hour used when no scale is given
pub const DEFAULT_HOUR_HEIGHT: f32 = 100.0;

/// Horizontal inset subtracted from every box so neighbours show a seam
pub const DEFAULT_GUTTER: f32 = 10.0;

/// Lays out overlapping events in side-by-side columns.
///
/// The packer is stateless between calls: every call to [`Packer::pack`]
/// recomputes the whole layout from scratch.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use daypack::{Event, layout::Packer};
/// let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
///
/// let packer = Packer::new(300.0).with_day_start_hour(8.0);
/// let boxes = packer.pack(vec![
///     Event::new(at(9, 0), at(10, 0), "a"),
///     Event::new(at(9, 30), at(10, 30), "b"),
/// ]);
///
/// assert_eq!(boxes.len(), 2);
/// assert_eq!(boxes[0].top(), 100.0);
/// assert_eq!(boxes[1].left(), 150.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packer {
    width: f32,
    day_start_hour: f32,
    hour_height: f32,
    gutter: f32,
}

impl Packer {
    /// Create a packer for a column `width` pixels wide, starting at midnight
    pub fn new(width: f32) -> Self {
        Self {
            width,
            day_start_hour: 0.0,
            hour_height: DEFAULT_HOUR_HEIGHT,
            gutter: DEFAULT_GUTTER,
        }
    }

    /// Set the first displayed hour; earlier events get a negative top
    pub fn with_day_start_hour(mut self, hour: f32) -> Self {
        self.day_start_hour = hour;
        self
    }

    /// Set the vertical scale in pixels per hour
    pub fn with_hour_height(mut self, hour_height: f32) -> Self {
        self.hour_height = hour_height;
        self
    }

    /// Set the inset subtracted from every box width
    pub fn with_gutter(mut self, gutter: f32) -> Self {
        self.gutter = gutter;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn day_start_hour(&self) -> f32 {
        self.day_start_hour
    }

    pub fn hour_height(&self) -> f32 {
        self.hour_height
    }

    pub fn gutter(&self) -> f32 {
        self.gutter
    }

    /// Calculate the layout for a set of events.
    ///
    /// Events may arrive in any order. They are sorted by start, then by end,
    /// and split into overlap groups; a group closes as soon as an event
    /// starts at or after the latest end seen so far. Within a group each
    /// event takes the first column whose last event it does not overlap.
    ///
    /// The output holds one record per input event, group by group in time
    /// order and column by column within a group. Each record carries the
    /// event's original index.
    ///
    /// Inverted or zero-length events are not rejected; they produce boxes
    /// with a non-positive height.
    pub fn pack<P>(&self, events: Vec<Event<P>>) -> Vec<PositionedEvent<P>> {
        let mut tagged: Vec<Tagged<P>> = events
            .into_iter()
            .enumerate()
            .map(|(index, event)| Tagged { index, event })
            .collect();

        // Stable, so identical intervals keep their input order
        tagged.sort_by(|a, b| {
            a.event
                .start()
                .cmp(&b.event.start())
                .then_with(|| a.event.end().cmp(&b.event.end()))
        });

        let mut positioned = Vec::with_capacity(tagged.len());
        let mut bunch = Bunch::new();
        let mut bunch_count = 0_usize;

        for item in tagged {
            if bunch.is_closed_by(&item.event) {
                self.flush(&mut bunch, &mut positioned);
                bunch_count += 1;
            }
            bunch.place(item);
        }

        if !bunch.is_empty() {
            self.flush(&mut bunch, &mut positioned);
            bunch_count += 1;
        }

        debug!(
            events_count = positioned.len(),
            bunch_count,
            width = self.width;
            "Packed events"
        );

        positioned
    }

    fn flush<P>(&self, bunch: &mut Bunch<P>, positioned: &mut Vec<PositionedEvent<P>>) {
        let placements = bunch.close();
        trace!(placements_count = placements.len(); "Closing bunch");

        positioned.extend(placements.into_iter().map(|placement| self.position(placement)));
    }

    /// Convert a column placement into pixel geometry.
    fn position<P>(&self, placement: Placement<P>) -> PositionedEvent<P> {
        let Placement {
            tagged: Tagged { index, event },
            column,
            span,
            column_count,
        } = placement;

        let columns = column_count as f32;
        let left = (column as f32 / columns) * self.width;
        let width = (self.width * span as f32) / columns - self.gutter;

        let top = (hours_since_midnight(event.start()) - self.day_start_hour) * self.hour_height;
        let height = hours_between(event.start(), event.end()) * self.hour_height;

        let bounds = Bounds::new_from_top_left(Point::new(left, top), Size::new(width, height));

        PositionedEvent::new(event, index, column, span, column_count, bounds)
    }
}

/// Lay out `events` in a column `width` pixels wide.
///
/// Shorthand for [`Packer`] with the default gutter. `hour_height` is the
/// number of pixels per hour, usually [`DEFAULT_HOUR_HEIGHT`].
pub fn layout<P>(
    events: Vec<Event<P>>,
    width: f32,
    day_start_hour: f32,
    hour_height: f32,
) -> Vec<PositionedEvent<P>> {
    Packer::new(width)
        .with_day_start_hour(day_start_hour)
        .with_hour_height(hour_height)
        .pack(events)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use float_cmp::assert_approx_eq;

    use super::*;

    const WIDTH: f32 = 300.0;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .and_then(|day| day.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn event(start: NaiveDateTime, end: NaiveDateTime, name: &'static str) -> Event<&'static str> {
        Event::new(start, end, name)
    }

    fn by_index<P>(mut positioned: Vec<PositionedEvent<P>>) -> Vec<PositionedEvent<P>> {
        positioned.sort_by_key(PositionedEvent::index);
        positioned
    }

    #[test]
    fn test_empty_input() {
        let positioned = Packer::new(WIDTH).pack(Vec::<Event>::new());
        assert!(positioned.is_empty());
    }

    #[test]
    fn test_single_event_takes_full_width() {
        let positioned = Packer::new(WIDTH).pack(vec![event(at(9, 0), at(10, 30), "solo")]);

        assert_eq!(positioned.len(), 1);
        let solo = &positioned[0];
        assert_eq!(solo.index(), 0);
        assert_approx_eq!(f32, solo.left(), 0.0);
        assert_approx_eq!(f32, solo.width(), WIDTH - DEFAULT_GUTTER);
        assert_approx_eq!(f32, solo.top(), 900.0);
        assert_approx_eq!(f32, solo.height(), 150.0);
        assert_eq!(*solo.event().payload(), "solo");
    }

    #[test]
    fn test_two_overlapping_events_split_width() {
        let positioned = by_index(Packer::new(WIDTH).pack(vec![
            event(at(9, 0), at(10, 0), "a"),
            event(at(9, 30), at(10, 30), "b"),
        ]));

        assert_eq!(positioned[0].column(), 0);
        assert_eq!(positioned[1].column(), 1);
        assert_eq!(positioned[0].span(), 1);
        assert_eq!(positioned[1].span(), 1);
        assert_approx_eq!(f32, positioned[0].left(), 0.0);
        assert_approx_eq!(f32, positioned[1].left(), WIDTH / 2.0);
        assert_approx_eq!(f32, positioned[0].width(), WIDTH / 2.0 - DEFAULT_GUTTER);
        assert_approx_eq!(f32, positioned[1].width(), WIDTH / 2.0 - DEFAULT_GUTTER);
    }

    #[test]
    fn test_three_identical_events_get_a_third_each() {
        let positioned = by_index(Packer::new(WIDTH).pack(vec![
            event(at(9, 0), at(10, 0), "a"),
            event(at(9, 0), at(10, 0), "b"),
            event(at(9, 0), at(10, 0), "c"),
        ]));

        for (column, item) in positioned.iter().enumerate() {
            // Identical intervals keep input order
            assert_eq!(item.column(), column);
            assert_eq!(item.column_count(), 3);
            assert_approx_eq!(f32, item.left(), column as f32 * WIDTH / 3.0);
            assert_approx_eq!(f32, item.width(), WIDTH / 3.0 - DEFAULT_GUTTER);
        }
    }

    #[test]
    fn test_touching_events_are_separate_groups() {
        let positioned = Packer::new(WIDTH).pack(vec![
            event(at(10, 0), at(11, 0), "second"),
            event(at(9, 0), at(10, 0), "first"),
        ]);

        // Output follows time order; indices still point into the input
        assert_eq!(positioned[0].index(), 1);
        assert_eq!(positioned[1].index(), 0);
        for item in &positioned {
            assert_eq!(item.column(), 0);
            assert_eq!(item.span(), 1);
            assert_eq!(item.column_count(), 1);
            assert_approx_eq!(f32, item.width(), WIDTH - DEFAULT_GUTTER);
        }
        assert_approx_eq!(f32, positioned[0].top(), 900.0);
        assert_approx_eq!(f32, positioned[1].top(), 1000.0);
    }

    #[test]
    fn test_shorter_event_with_same_start_is_placed_first() {
        let positioned = by_index(Packer::new(WIDTH).pack(vec![
            event(at(9, 0), at(11, 0), "long"),
            event(at(9, 0), at(10, 0), "short"),
            event(at(10, 0), at(11, 0), "after"),
        ]));

        assert_eq!(positioned[1].column(), 0);
        assert_eq!(positioned[2].column(), 0);
        assert_eq!(positioned[0].column(), 1);
        assert!(positioned.iter().all(|p| p.span() == 1));
        assert_approx_eq!(f32, positioned[0].left(), WIDTH / 2.0);
    }

    #[test]
    fn test_widened_event_covers_free_columns() {
        let positioned = by_index(Packer::new(WIDTH).pack(vec![
            event(at(8, 0), at(12, 0), "long"),
            event(at(9, 0), at(9, 30), "early"),
            event(at(9, 0), at(10, 0), "hour"),
            event(at(10, 30), at(11, 0), "late"),
        ]));

        let late = &positioned[3];
        assert_eq!(late.column(), 1);
        assert_eq!(late.span(), 2);
        assert_approx_eq!(f32, late.left(), WIDTH / 3.0);
        assert_approx_eq!(f32, late.width(), WIDTH * 2.0 / 3.0 - DEFAULT_GUTTER);
    }

    #[test]
    fn test_event_before_day_start_has_negative_top() {
        let positioned = Packer::new(WIDTH)
            .with_day_start_hour(8.0)
            .pack(vec![event(at(7, 0), at(8, 0), "early")]);

        assert_approx_eq!(f32, positioned[0].top(), -100.0);
        assert_approx_eq!(f32, positioned[0].height(), 100.0);
    }

    #[test]
    fn test_hour_height_scales_geometry() {
        let positioned = Packer::new(WIDTH)
            .with_day_start_hour(6.0)
            .with_hour_height(60.0)
            .pack(vec![event(at(7, 30), at(8, 15), "scaled")]);

        assert_approx_eq!(f32, positioned[0].top(), 90.0);
        assert_approx_eq!(f32, positioned[0].height(), 45.0);
    }

    #[test]
    fn test_inverted_event_passes_through() {
        let positioned = Packer::new(WIDTH).pack(vec![event(at(10, 0), at(9, 0), "inverted")]);

        assert_eq!(positioned.len(), 1);
        assert_approx_eq!(f32, positioned[0].height(), -100.0);
    }

    #[test]
    fn test_zero_length_events_never_share_a_group() {
        let positioned = Packer::new(WIDTH).pack(vec![
            event(at(9, 0), at(9, 0), "a"),
            event(at(9, 0), at(9, 0), "b"),
        ]);

        // Each closes the previous group since start >= last end
        assert_eq!(positioned.len(), 2);
        assert!(positioned.iter().all(|p| p.column_count() == 1));
    }

    #[test]
    fn test_custom_gutter() {
        let positioned = Packer::new(WIDTH)
            .with_gutter(0.0)
            .pack(vec![event(at(9, 0), at(10, 0), "flush")]);

        assert_approx_eq!(f32, positioned[0].width(), WIDTH);
    }

    #[test]
    fn test_layout_shorthand_matches_packer() {
        let events = vec![
            event(at(9, 0), at(10, 0), "a"),
            event(at(9, 30), at(10, 30), "b"),
        ];

        let shorthand = layout(events.clone(), WIDTH, 8.0, DEFAULT_HOUR_HEIGHT);
        let packed = Packer::new(WIDTH).with_day_start_hour(8.0).pack(events);

        assert_eq!(shorthand, packed);
    }

    #[test]
    fn test_date_is_ignored_for_top() {
        let next_day = NaiveDate::from_ymd_opt(2024, 5, 7)
            .and_then(|day| day.and_hms_opt(9, 0, 0))
            .unwrap();
        let positioned = Packer::new(WIDTH).pack(vec![event(next_day, at(23, 0), "odd")]);

        assert_approx_eq!(f32, positioned[0].top(), 900.0);
    }
}
