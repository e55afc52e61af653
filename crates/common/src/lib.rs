//! vsvm common types and instruction encoding.
//!
//! This crate provides the instruction set consumed by the interpreter:
//!
//! - [`Opcode`]: the 15 opcodes with their word values and widths
//! - [`Program`]: an untagged stream of 32-bit words
//! - [`DecodeError`]: errors from decoding words and byte streams
//!
//! # Dependencies
//!
//! This crate uses `thiserror` and has no other dependencies.

pub mod error;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use opcode::Opcode;
pub use program::Program;
