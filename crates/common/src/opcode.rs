//! Opcode definitions for the vsvm instruction set.
//!
//! Every instruction is one opcode word followed by a fixed number of
//! immediate operand words. Operand words carry no tag; their position is
//! implied by the opcode's width.

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// The `#[repr(i32)]` attribute gives each variant its stable word value.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Push the immediate operand.
    Iconst = 1,

    // Arithmetic
    /// Pop b, pop a, push a + b.
    Iadd = 2,
    /// Pop b, pop a, push a - b.
    Isub = 3,
    /// Pop b, pop a, push a * b.
    Imul = 4,

    // Comparison
    /// Pop b, pop a, push 1 if a < b else 0.
    Ilt = 5,
    /// Pop b, pop a, push 1 if a > b else 0.
    Igt = 6,
    /// Pop b, pop a, push 1 if a == b else 0.
    Ieq = 7,
    /// Pop b, pop a, push 1 if a != b else 0.
    Ineq = 8,

    // Control flow
    /// Pop a flag, jump to the immediate target if it is nonzero.
    Brt = 9,
    /// Pop a flag, jump to the immediate target if it is zero.
    Brf = 10,
    /// Save arg count, frame pointer and return address, then jump.
    /// Operands: target, arg_count.
    Call = 11,
    /// Unwind the current frame and push the function result.
    Ret = 12,

    // Frame access
    /// Push the stack slot at frame_pointer + offset.
    Load = 13,

    // VM control
    /// Emit the top of stack to the tracer without popping it.
    Print = 14,
    /// Stop execution.
    Halt = 15,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 15] = [
    Opcode::Iconst,
    Opcode::Iadd,
    Opcode::Isub,
    Opcode::Imul,
    Opcode::Ilt,
    Opcode::Igt,
    Opcode::Ieq,
    Opcode::Ineq,
    Opcode::Brt,
    Opcode::Brf,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Load,
    Opcode::Print,
    Opcode::Halt,
];

impl TryFrom<i32> for Opcode {
    type Error = DecodeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Iconst),
            2 => Ok(Opcode::Iadd),
            3 => Ok(Opcode::Isub),
            4 => Ok(Opcode::Imul),
            5 => Ok(Opcode::Ilt),
            6 => Ok(Opcode::Igt),
            7 => Ok(Opcode::Ieq),
            8 => Ok(Opcode::Ineq),
            9 => Ok(Opcode::Brt),
            10 => Ok(Opcode::Brf),
            11 => Ok(Opcode::Call),
            12 => Ok(Opcode::Ret),
            13 => Ok(Opcode::Load),
            14 => Ok(Opcode::Print),
            15 => Ok(Opcode::Halt),
            _ => Err(DecodeError::UnknownOpcode(value)),
        }
    }
}

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Iconst => "ICONST",
            Opcode::Iadd => "IADD",
            Opcode::Isub => "ISUB",
            Opcode::Imul => "IMUL",
            Opcode::Ilt => "ILT",
            Opcode::Igt => "IGT",
            Opcode::Ieq => "IEQ",
            Opcode::Ineq => "INEQ",
            Opcode::Brt => "BRT",
            Opcode::Brf => "BRF",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Load => "LOAD",
            Opcode::Print => "PRINT",
            Opcode::Halt => "HALT",
        }
    }

    /// Number of immediate operand words following the opcode.
    pub fn operand_count(&self) -> usize {
        match self {
            Opcode::Call => 2,
            Opcode::Iconst | Opcode::Brt | Opcode::Brf | Opcode::Load => 1,
            Opcode::Iadd
            | Opcode::Isub
            | Opcode::Imul
            | Opcode::Ilt
            | Opcode::Igt
            | Opcode::Ieq
            | Opcode::Ineq
            | Opcode::Ret
            | Opcode::Print
            | Opcode::Halt => 0,
        }
    }

    /// Total words occupied by the instruction, opcode included.
    pub fn width(&self) -> usize {
        1 + self.operand_count()
    }

    /// Look up an opcode by its (uppercase) mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }
}
