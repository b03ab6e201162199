//! CLI logic for the level scheme drawer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use lsd::{LsdError, SchemeBuilder};

/// Run the LSD CLI application
///
/// Reads the input scheme, lays it out and writes the resulting SVG to the
/// output file.
///
/// # Errors
///
/// Returns `LsdError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LsdError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing level scheme"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_overrides(&mut app_config, args);

    let source = fs::read_to_string(&args.input)?;

    let builder = SchemeBuilder::new(app_config);
    let scheme = builder.parse(&source)?;
    let svg = builder.render_svg(&scheme)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
