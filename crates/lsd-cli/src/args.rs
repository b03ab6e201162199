//! Command-line argument definitions for the LSD CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity and a few layout overrides that win over the
//! configuration file.

use clap::Parser;

use lsd::style::LevelStyle;

/// Command-line arguments for the level scheme drawer
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scheme file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Minimum distance between two drawn levels, in energy units
    #[arg(long)]
    pub spacing: Option<f32>,

    /// Draw every level at its energy, however close
    #[arg(long)]
    pub no_normalize: bool,

    /// Level bar style
    #[arg(long, value_parser = parse_style)]
    pub style: Option<LevelStyle>,

    /// Keep levels at their energy and stretch their kinks instead
    #[arg(long)]
    pub proportional: bool,
}

fn parse_style(value: &str) -> Result<LevelStyle, String> {
    value.parse().map_err(|err: lsd::style::UnknownStyleError| err.to_string())
}
