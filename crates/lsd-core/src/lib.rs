//! LSD Core Types and Definitions
//!
//! This crate provides the foundational types shared by the LSD level scheme
//! crates. It includes:
//!
//! - **Scheme**: Levels, transitions and the level arena ([`scheme`] module)
//! - **Styles**: The closed set of level bar shapes ([`style::LevelStyle`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Strokes**: Line definitions for SVG output ([`stroke`] module)
//! - **Layers**: Z-ordered SVG output collection ([`layer`] module)

pub mod color;
pub mod geometry;
pub mod layer;
pub mod scheme;
pub mod stroke;
pub mod style;
