//! JSON rendering of a laid-out day.

use chrono::NaiveDateTime;
use log::warn;
use serde::Serialize;
use serde_json::Value;

use daypack::{
    DayLayout, DaypackError, PositionedEvent,
    timeline::{GridLine, GridLineKind, Timeline},
};

use crate::input::Payload;

#[derive(Debug, Serialize)]
struct DayOutput {
    height: f32,
    initial_scroll: f32,
    grid: Vec<GridLineOutput>,
    events: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct GridLineOutput {
    hour: u32,
    minute: u32,
    y: f32,
    kind: &'static str,
}

impl From<&GridLine> for GridLineOutput {
    fn from(line: &GridLine) -> Self {
        let kind = match line.kind() {
            GridLineKind::Hour => "hour",
            GridLineKind::Slot => "slot",
        };

        Self {
            hour: line.hour(),
            minute: line.minute(),
            y: line.y(),
            kind,
        }
    }
}

#[derive(Debug, Serialize)]
struct EventOutput {
    index: usize,
    column: usize,
    span: usize,
    columns: usize,
    top: f32,
    left: f32,
    /// `left` shifted past the hour label column
    screen_left: f32,
    width: f32,
    height: f32,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl EventOutput {
    fn new(positioned: &PositionedEvent<Payload>, timeline: &Timeline) -> Self {
        let event = positioned.event();

        Self {
            index: positioned.index(),
            column: positioned.column(),
            span: positioned.span(),
            columns: positioned.column_count(),
            top: positioned.top(),
            left: positioned.left(),
            screen_left: timeline.to_screen(positioned.bounds()).min_x(),
            width: positioned.width(),
            height: positioned.height(),
            start: event.start(),
            end: event.end(),
        }
    }
}

/// Merge the computed fields of an event over its payload.
///
/// Payload keys named like a computed field are replaced, so `index` and the
/// geometry always describe the layout.
fn event_json(
    positioned: &PositionedEvent<Payload>,
    timeline: &Timeline,
) -> Result<Value, DaypackError> {
    let computed = serde_json::to_value(EventOutput::new(positioned, timeline))
        .map_err(|err| DaypackError::Output(err.to_string()))?;
    let Value::Object(computed) = computed else {
        return Err(DaypackError::Output("event did not serialize to an object".to_string()));
    };

    let mut fields = positioned.event().payload().clone();
    for (key, value) in computed {
        if fields.insert(key.clone(), value).is_some() {
            warn!(index = positioned.index(), key; "Payload field replaced by computed value");
        }
    }

    Ok(Value::Object(fields))
}

/// Render a day layout as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`DaypackError::Output`] if serialization fails.
pub fn to_json(day: &DayLayout<Payload>) -> Result<String, DaypackError> {
    let output = DayOutput {
        height: day.height(),
        initial_scroll: day.initial_scroll(),
        grid: day.grid().iter().map(GridLineOutput::from).collect(),
        events: day
            .events()
            .iter()
            .map(|positioned| event_json(positioned, day.timeline()))
            .collect::<Result<_, _>>()?,
    };

    serde_json::to_string_pretty(&output).map_err(|err| DaypackError::Output(err.to_string()))
}
