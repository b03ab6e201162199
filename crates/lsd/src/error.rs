//! Error types for LSD operations.
//!
//! [`LsdError`] wraps every failure that can occur between reading a scheme
//! file and writing its SVG.

use std::io;

use thiserror::Error;

use lsd_parser::ParseError;

use crate::{export::ExportError, layout::LayoutError};

/// The main error type for LSD operations.
///
/// The `Parse` variant keeps the source text next to the diagnostics so
/// callers can point at the offending lines.
#[derive(Debug, Error)]
pub enum LsdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LsdError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
