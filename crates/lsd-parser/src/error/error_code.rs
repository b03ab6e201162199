//! Error codes for the LSD diagnostic system.
//!
//! - `E1xx` - Line structure errors
//! - `E2xx` - Whole-file errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Line Errors (E1xx)
    // =========================================================================
    /// Malformed transition line.
    ///
    /// A line must have exactly three `>`-separated sections:
    /// `parent > transition > daughter`.
    E100,

    /// Invalid level energy.
    ///
    /// The energy of a level is missing or is not a finite number.
    E101,

    /// Too many level fields.
    ///
    /// A level takes at most `energy,spin,parity`.
    E102,

    /// Too many transition fields.
    ///
    /// A transition takes at most `gamma,branching_ratio`.
    E103,

    // =========================================================================
    // File Errors (E2xx)
    // =========================================================================
    /// Empty scheme.
    ///
    /// The input contains no transitions.
    E200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E101").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed transition line",
            ErrorCode::E101 => "invalid level energy",
            ErrorCode::E102 => "too many level fields",
            ErrorCode::E103 => "too many transition fields",
            ErrorCode::E200 => "empty scheme",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
