//! Command-line argument definitions for the Daypack CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the screen geometry overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Daypack layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input day file (TOML, or JSON with a .json extension)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Screen width in pixels, overriding the configuration
    #[arg(long)]
    pub width: Option<f32>,

    /// First displayed hour, overriding the configuration
    #[arg(long)]
    pub first_hour: Option<u32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
