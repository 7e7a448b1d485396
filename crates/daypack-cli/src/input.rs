//! Reading a day of events from TOML or JSON.
//!
//! Both formats carry a list of records under `events`. Each record needs a
//! `start` and may have an `end`, both local date-times such as
//! `"2024-05-06T09:30:00"`. Any other field is kept as payload and written
//! back out next to the computed box.

use std::path::Path;

use chrono::NaiveDateTime;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use daypack::{DaypackError, normalize::Draft};

/// Extra fields of an input record, passed through untouched.
pub type Payload = Map<String, Value>;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Pick the format from a file extension; anything but `.json` is TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DayFile {
    #[serde(default)]
    events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    start: NaiveDateTime,
    #[serde(default)]
    end: Option<NaiveDateTime>,
    #[serde(flatten)]
    payload: Payload,
}

impl From<EventRecord> for Draft<Payload> {
    fn from(record: EventRecord) -> Self {
        Draft::new(record.start, record.end, record.payload)
    }
}

/// Parse the contents of a day file.
///
/// # Errors
///
/// Returns [`DaypackError::Parse`] carrying the source text and, when the
/// parser reports one, the byte range of the problem.
pub fn parse(source: &str, format: Format) -> Result<Vec<Draft<Payload>>, DaypackError> {
    let day: DayFile = match format {
        Format::Toml => toml::from_str(source).map_err(|err| {
            DaypackError::new_parse_error(err.message(), source, err.span())
        })?,
        Format::Json => serde_json::from_str(source).map_err(|err| {
            let offset = byte_offset(source, err.line(), err.column());
            DaypackError::new_parse_error(
                err.to_string(),
                source,
                offset.map(|offset| offset..offset),
            )
        })?,
    };

    debug!(format:?, events_count = day.events.len(); "Parsed day file");

    Ok(day.events.into_iter().map(Draft::from).collect())
}

/// Convert serde_json's 1-based line and column into a byte offset.
fn byte_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();

    Some((line_start + column.saturating_sub(1)).min(source.len()))
}
