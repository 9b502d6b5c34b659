//! # Error Types
//!
//! Parse errors for the hex-encoded value types.

use thiserror::Error;

/// Errors from parsing hex-encoded addresses and hashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was not valid hex.
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    /// Decoded byte length did not match the type's width.
    #[error("Bad length: expected {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },
}
