//! Operator table: pure integer functions used by the dispatcher.
//!
//! Booleans are plain integers: comparisons produce `1` or `0`, and any
//! nonzero value counts as true.

use std::fmt;

/// Binary operators applied as `f(a, b)` where `b` was on top of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Lt,
    Gt,
    Eq,
    Neq,
}

impl BinaryOp {
    /// Apply the operator. Arithmetic wraps on overflow.
    pub fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Lt => from_bool(a < b),
            BinaryOp::Gt => from_bool(a > b),
            BinaryOp::Eq => from_bool(a == b),
            BinaryOp::Neq => from_bool(a != b),
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            BinaryOp::Add => "iadd",
            BinaryOp::Sub => "isub",
            BinaryOp::Mul => "imul",
            BinaryOp::Lt => "ilt",
            BinaryOp::Gt => "igt",
            BinaryOp::Eq => "ieq",
            BinaryOp::Neq => "ineq",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Unary predicate deciding whether a conditional branch is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCondition {
    /// BRT: taken when the flag is nonzero.
    IfTrue,
    /// BRF: taken when the flag is zero.
    IfFalse,
}

impl BranchCondition {
    pub fn holds(self, flag: i32) -> bool {
        match self {
            BranchCondition::IfTrue => identity(flag) != 0,
            BranchCondition::IfFalse => negate(flag) != 0,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            BranchCondition::IfTrue => "brt",
            BranchCondition::IfFalse => "brf",
        }
    }
}

/// Truth value as an integer.
pub fn from_bool(value: bool) -> i32 {
    if value {
        1
    } else {
        0
    }
}

pub fn identity(value: i32) -> i32 {
    value
}

/// Logical negation: `1` for zero, `0` for anything else.
pub fn negate(value: i32) -> i32 {
    from_bool(value == 0)
}
