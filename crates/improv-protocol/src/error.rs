//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when encoding Improv frames.
///
/// These are rejected locally, before any byte reaches the wire. Decoding has
/// no error cases: malformed input is handled by silently resynchronizing on
/// the frame header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A single RPC argument exceeds its one-byte length prefix.
    #[error("argument too long: maximum {max} bytes, got {actual}")]
    ArgumentTooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual argument length.
        actual: usize,
    },

    /// The composed payload exceeds the one-byte frame length field.
    #[error("payload too large: maximum {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Maximum allowed length.
        max: usize,
        /// Actual payload length.
        actual: usize,
    },
}
