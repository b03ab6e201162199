//! Export of laid-out level schemes.
//!
//! This module provides the [`Exporter`] trait that turns a
//! [`SchemeLayout`] into an output format. It is the last stage of the
//! pipeline.
//!
//! ```text
//! Source Text
//!     ↓ parse
//! LevelScheme
//!     ↓ layout
//! SchemeLayout
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]

/// SVG export backend.
pub mod svg;

use thiserror::Error;

use crate::layout::SchemeLayout;

/// Abstraction for scheme export backends.
pub trait Exporter {
    /// Renders a laid-out scheme and returns the document text.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidPosition`] if a level or transition sits
    /// outside the drawable area.
    fn export_scheme_layout(&mut self, layout: &SchemeLayout) -> Result<String, ExportError>;
}

/// Errors raised while exporting a scheme.
///
/// Every variant is fatal to the draw call that raised it and leaves nothing
/// half-written.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    #[error("level width must lie within [0, 1], got {0}")]
    InvalidWidth(f32),

    #[error("position ({x}, {y}) is outside the drawable area")]
    InvalidPosition { x: f32, y: f32 },

    #[error("invalid value for style.{field}: {message}")]
    InvalidStyle {
        field: &'static str,
        message: String,
    },

    #[error("canvas of {width}x{height} pixels is too small to draw on")]
    InvalidCanvas { width: f32, height: f32 },
}
