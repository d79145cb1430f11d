//! Centralized error handling for the editor core
//! Defines the taxonomy every fallible operation in this crate reports through.

use std::fmt;

/// A structured error produced by the gap buffer, undo manager, or scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Storage could not be grown (buffer reallocation or undo-entry capture).
    AllocationFailure,
    /// Scanner asked to scan at or past the end of the buffer after whitespace skipping.
    EndOfBuffer,
    /// Scanner reached end of buffer while an open group was still unclosed.
    UnbalancedParentheses,
    /// Scanner found a closer that does not match its context's opener.
    MismatchedParentheses,
    /// Top-level scan encountered a closing delimiter first.
    UnexpectedCloseParen,
    /// Scanner reached end of buffer inside a string literal.
    UnbalancedString,
    /// An opener has no registered matching closer in the syntax table.
    InvalidSyntax {
        /// The opener byte that has no registered closer.
        opener: u8,
    },
    /// Backward `scan_sexp_n` (`n < 0`) is not implemented.
    NotImplemented,
    /// Nested-parenthesis recursion exceeded the configured depth guard.
    RecursionLimitExceeded {
        /// The configured limit that was exceeded.
        limit: usize,
    },
    /// A caller-supplied logical position exceeds the buffer's current length.
    PositionOutOfBounds {
        /// The rejected position.
        pos: usize,
        /// The buffer's logical length at the time of the call.
        len: usize,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure => write!(f, "allocation failure"),
            Self::EndOfBuffer => write!(f, "scan reached end of buffer"),
            Self::UnbalancedParentheses => {
                write!(f, "unbalanced parentheses: end of buffer inside an open group")
            }
            Self::MismatchedParentheses => write!(f, "mismatched parentheses"),
            Self::UnexpectedCloseParen => write!(f, "unexpected closing delimiter"),
            Self::UnbalancedString => write!(f, "unbalanced string literal"),
            Self::InvalidSyntax { opener } => {
                write!(f, "opener {:#04x} has no registered matching closer", opener)
            }
            Self::NotImplemented => write!(f, "backward scan_sexp_n is not implemented"),
            Self::RecursionLimitExceeded { limit } => {
                write!(f, "scan recursion exceeded depth limit ({limit})")
            }
            Self::PositionOutOfBounds { pos, len } => {
                write!(f, "position {pos} is out of bounds for buffer of length {len}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Result alias for fallible core operations.
pub type Result<T> = std::result::Result<T, CoreError>;


