//! # LSD Parser
//!
//! Parser for level scheme files. Each non-blank line describes one
//! transition:
//!
//! ```text
//! # parent        > transition     > daughter
//! 2505.7,4,1      > 1173.2,0.999   > 1332.5,2,1
//! 1332.5,2,1      > 1332.5         > 0,0,1
//! ```
//!
//! A level is `energy[,spin[,parity]]` and a transition is
//! `[gamma[,branching_ratio]]`. Whitespace is ignored, `#` starts a comment,
//! and optional values that are empty, `None` or not numbers are treated as
//! missing.
//!
//! ## Usage
//!
//! ```
//! # use lsd_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let scheme = parse("1332.5,2,1 > 1332.5 > 0,0,1")?;
//!     assert_eq!(scheme.levels().len(), 2);
//!     assert_eq!(scheme.transitions().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;
mod parser;
mod span;

pub use error::ParseError;
pub use span::Span;

use lsd_core::scheme::LevelScheme;

/// Parse source text into a level scheme.
///
/// Every line is checked before failing, so the returned [`ParseError`]
/// carries one diagnostic per problem found.
///
/// # Errors
///
/// Returns a [`ParseError`] when a line is malformed or when the input has
/// no transitions at all.
pub fn parse(source: &str) -> Result<LevelScheme, ParseError> {
    parser::parse_scheme(source)
}
