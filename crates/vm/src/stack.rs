//! Bounded operand stack.
//!
//! `push`, `pop` and `peek` are the only ways values move on and off the
//! stack. The call-frame protocol additionally rewinds the stack to a saved
//! frame base with [`Stack::truncate`] and drops argument slots with
//! [`Stack::discard`].

use crate::error::{Region, RuntimeError};

/// Slots reserved up front; larger stacks grow on demand up to capacity.
const PREALLOCATED_SLOTS: usize = 4096;

/// A stack fault, before it is tagged with the faulting instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    Overflow { capacity: usize },
    Underflow,
    OutOfBounds { index: i64, len: usize },
}

impl StackError {
    /// Attach the word index of the instruction that caused the fault.
    pub fn at(self, at: usize) -> RuntimeError {
        match self {
            StackError::Overflow { capacity } => RuntimeError::StackOverflow { at, capacity },
            StackError::Underflow => RuntimeError::StackUnderflow { at },
            StackError::OutOfBounds { index, len } => RuntimeError::OutOfBounds {
                at,
                region: Region::Stack,
                index,
                len,
            },
        }
    }
}

/// Operand stack of `i32` values with a fixed capacity.
#[derive(Debug, Clone)]
pub struct Stack {
    slots: Vec<i32>,
    capacity: usize,
}

impl Stack {
    /// Create an empty stack that holds at most `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(PREALLOCATED_SLOTS)),
            capacity,
        }
    }

    /// Push a value, failing if the stack is full.
    pub fn push(&mut self, value: i32) -> Result<(), StackError> {
        if self.slots.len() >= self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.slots.push(value);
        Ok(())
    }

    /// Remove and return the top value.
    pub fn pop(&mut self) -> Result<i32, StackError> {
        self.slots.pop().ok_or(StackError::Underflow)
    }

    /// Return the top value without removing it.
    pub fn peek(&self) -> Result<i32, StackError> {
        self.slots.last().copied().ok_or(StackError::Underflow)
    }

    /// Read the live slot at `index` (0 is the bottom).
    pub fn get(&self, index: i64) -> Result<i32, StackError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.slots.get(i).copied())
            .ok_or(StackError::OutOfBounds {
                index,
                len: self.slots.len(),
            })
    }

    /// Rewind so that exactly `len` slots remain. Cannot grow the stack.
    pub fn truncate(&mut self, len: usize) -> Result<(), StackError> {
        if len > self.slots.len() {
            return Err(StackError::OutOfBounds {
                index: len as i64 - 1,
                len: self.slots.len(),
            });
        }
        self.slots.truncate(len);
        Ok(())
    }

    /// Drop `count` slots from the top.
    pub fn discard(&mut self, count: usize) -> Result<(), StackError> {
        let remaining = self
            .slots
            .len()
            .checked_sub(count)
            .ok_or(StackError::Underflow)?;
        self.slots.truncate(remaining);
        Ok(())
    }

    /// Index of the top element, `-1` when empty.
    pub fn pointer(&self) -> isize {
        self.slots.len() as isize - 1
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live contents, bottom first.
    pub fn as_slice(&self) -> &[i32] {
        &self.slots
    }
}
