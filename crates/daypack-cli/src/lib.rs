//! CLI logic for the Daypack layout tool.
//!
//! Reads a day of events from a file, lays it out with
//! [`daypack::TimelineBuilder`] and writes the positioned events as JSON.

pub mod error_adapter;
pub mod input;
pub mod output;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use daypack::{DaypackError, TimelineBuilder};

use input::Format;

/// Run the Daypack CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DaypackError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Events refused by the duration policy
/// - Output serialization errors
pub fn run(args: &Args) -> Result<(), DaypackError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing day"
    );

    // Load configuration and apply command-line overrides
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(width) = args.width {
        app_config = app_config.with_screen_width(width);
    }
    if let Some(first_hour) = args.first_hour {
        app_config = app_config.with_first_hour(first_hour);
    }

    let source = fs::read_to_string(&args.input)?;
    let drafts = input::parse(&source, Format::from_path(&args.input))?;

    let builder = TimelineBuilder::new(app_config);
    let day = builder.layout_day(drafts)?;
    let json = output::to_json(&day)?;

    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        events_count = day.events().len();
        "Layout exported successfully"
    );

    Ok(())
}
