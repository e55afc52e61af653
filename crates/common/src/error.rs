//! Decode errors for vsvm instruction streams.

use thiserror::Error;

/// Errors that occur while decoding words or byte streams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The word does not name any opcode in the instruction set.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(i32),

    /// Byte stream length is not a multiple of 4.
    #[error("invalid byte stream length: {0} (must be multiple of 4)")]
    InvalidLength(usize),
}
