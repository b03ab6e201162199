//! Error and diagnostic system for the LSD parser.
//!
//! Every problem found in a scheme file becomes a [`Diagnostic`] with an
//! [`ErrorCode`], one or more labeled [`Span`](crate::Span)s and optional
//! help text. All lines are checked before parsing fails, so a single
//! [`ParseError`] can carry many diagnostics.
//!
//! # Example
//!
//! ```
//! # use lsd_parser::error::{Diagnostic, ErrorCode};
//! # use lsd_parser::Span;
//!
//! let diag = Diagnostic::error("level energy `abc` is not a number")
//!     .with_code(ErrorCode::E101)
//!     .with_label(Span::new(0..3), "expected a finite number")
//!     .with_help("write the energy first, e.g. `1332.5,4,1`");
//! assert_eq!(diag.to_string(), "error[E101]: level energy `abc` is not a number");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
