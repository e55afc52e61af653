//! Runtime faults for the vsvm interpreter.
//!
//! Every fault is fatal to the run that raised it. Each variant carries the
//! word index of the faulting instruction (`at`) for debugging.

use std::fmt;
use thiserror::Error;

/// Which indexed area an out-of-bounds access targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The instruction stream.
    Program,
    /// The operand stack.
    Stack,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Program => write!(f, "program"),
            Region::Stack => write!(f, "stack"),
        }
    }
}

/// Errors that stop execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A push would exceed the configured stack capacity.
    #[error("stack overflow (capacity {capacity}) at instruction {at}")]
    StackOverflow { at: usize, capacity: usize },

    /// Pop or peek on an empty stack, or an unwind deeper than the stack.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// Program counter or stack index outside the valid range.
    #[error("{region} index {index} out of bounds (length {len}) at instruction {at}")]
    OutOfBounds {
        at: usize,
        region: Region,
        index: i64,
        len: usize,
    },

    /// The fetched word is not a known opcode.
    #[error("unknown opcode {value} at instruction {at}")]
    UnknownOpcode { at: usize, value: i32 },
}

impl RuntimeError {
    /// Word index of the instruction that faulted.
    pub fn at(&self) -> usize {
        match self {
            RuntimeError::StackOverflow { at, .. }
            | RuntimeError::StackUnderflow { at }
            | RuntimeError::OutOfBounds { at, .. }
            | RuntimeError::UnknownOpcode { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::StackOverflow { at: 4, capacity: 2 }.to_string(),
            "stack overflow (capacity 2) at instruction 4"
        );
        assert_eq!(
            RuntimeError::StackUnderflow { at: 0 }.to_string(),
            "stack underflow at instruction 0"
        );
        assert_eq!(
            RuntimeError::OutOfBounds {
                at: 3,
                region: Region::Program,
                index: 9,
                len: 4
            }
            .to_string(),
            "program index 9 out of bounds (length 4) at instruction 3"
        );
        assert_eq!(
            RuntimeError::OutOfBounds {
                at: 8,
                region: Region::Stack,
                index: -2,
                len: 1
            }
            .to_string(),
            "stack index -2 out of bounds (length 1) at instruction 8"
        );
        assert_eq!(
            RuntimeError::UnknownOpcode { at: 1, value: 99 }.to_string(),
            "unknown opcode 99 at instruction 1"
        );
    }

    #[test]
    fn at_reports_fault_location() {
        assert_eq!(RuntimeError::StackUnderflow { at: 7 }.at(), 7);
        assert_eq!(RuntimeError::UnknownOpcode { at: 2, value: 0 }.at(), 2);
    }
}
