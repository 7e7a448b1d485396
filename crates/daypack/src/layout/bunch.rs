//! Overlap groups and first-fit column placement.
//!
//! A [`Bunch`] collects time-sorted events that are transitively
//! overlap-connected. Each event is dropped into the first column whose last
//! event it does not overlap, or into a new column on the right. When the
//! bunch closes every event is assigned a column span: the number of columns,
//! starting from its own, it can stretch across before a later column holds a
//! conflicting event.

use chrono::NaiveDateTime;
use log::trace;

use daypack_core::event::Event;

/// An event tagged with its position in the caller's input list.
#[derive(Debug)]
pub(super) struct Tagged<P> {
    pub(super) index: usize,
    pub(super) event: Event<P>,
}

/// An event ready for geometry conversion.
#[derive(Debug)]
pub(super) struct Placement<P> {
    pub(super) tagged: Tagged<P>,
    pub(super) column: usize,
    pub(super) span: usize,
    pub(super) column_count: usize,
}

/// The currently open overlap group.
#[derive(Debug)]
pub(super) struct Bunch<P> {
    columns: Vec<Vec<Tagged<P>>>,
    last_end: Option<NaiveDateTime>,
}

impl<P> Bunch<P> {
    pub(super) fn new() -> Self {
        Self {
            columns: Vec::new(),
            last_end: None,
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns true if nothing in the bunch is still running at `event.start`.
    ///
    /// An empty bunch is never closed by an event.
    pub(super) fn is_closed_by(&self, event: &Event<P>) -> bool {
        self.last_end.is_some_and(|last_end| event.start() >= last_end)
    }

    /// Places an event into the first column that accepts it.
    ///
    /// A column accepts an event if its most recently placed event does not
    /// overlap it. Events must arrive sorted by `(start, end)`.
    pub(super) fn place(&mut self, tagged: Tagged<P>) {
        let end = tagged.event.end();

        let free_column = self.columns.iter_mut().find(|column| {
            column
                .last()
                .is_some_and(|last| !last.event.overlaps(&tagged.event))
        });

        match free_column {
            Some(column) => column.push(tagged),
            None => {
                trace!(index = tagged.index, column = self.columns.len(); "Opening column");
                self.columns.push(vec![tagged]);
            }
        }

        if self.last_end.is_none_or(|last_end| end > last_end) {
            self.last_end = Some(end);
        }
    }

    /// Counts the columns `event` in `column` may stretch across.
    ///
    /// Scanning stops at the first later column that holds any overlapping
    /// event, even if a column further right would be free.
    fn column_span(&self, event: &Event<P>, column: usize) -> usize {
        let mut span = 1;
        for later in &self.columns[column + 1..] {
            if later.iter().any(|other| event.overlaps(&other.event)) {
                return span;
            }
            span += 1;
        }
        span
    }

    /// Closes the bunch, returning its events in column-major order.
    ///
    /// The bunch is left empty and may be reused for the next group.
    pub(super) fn close(&mut self) -> Vec<Placement<P>> {
        let column_count = self.columns.len();

        let spans: Vec<Vec<usize>> = self
            .columns
            .iter()
            .enumerate()
            .map(|(column, events)| {
                events
                    .iter()
                    .map(|tagged| self.column_span(&tagged.event, column))
                    .collect()
            })
            .collect();

        self.last_end = None;

        self.columns
            .drain(..)
            .zip(spans)
            .enumerate()
            .flat_map(|(column, (events, spans))| {
                events
                    .into_iter()
                    .zip(spans)
                    .map(move |(tagged, span)| Placement {
                        tagged,
                        column,
                        span,
                        column_count,
                    })
            })
            .collect()
    }
}
