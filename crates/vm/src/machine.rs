//! VM state management: instruction stream access, stack, frame pointer.

use crate::config::VmConfig;
use crate::error::{Region, RuntimeError};
use crate::stack::Stack;
use vsvm_common::Program;

/// Why a run stopped without faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// A HALT instruction was executed.
    Instruction,
    /// The program counter reached the end of the instruction stream.
    EndOfProgram,
}

/// Lifecycle of one run. `Halted` and `Faulted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Running,
    Halted(HaltReason),
    Faulted(RuntimeError),
}

impl State {
    pub fn is_running(&self) -> bool {
        matches!(self, State::Running)
    }
}

/// The vsvm interpreter. One value per run; never shared.
pub struct VM<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Operand stack. Also holds the saved state of every active call.
    pub(crate) stack: Stack,
    /// Index of the next word to fetch.
    pub(crate) pc: usize,
    /// Stack index of the current frame base, `-1` at top level.
    pub(crate) fp: i32,
    pub(crate) state: State,
    /// Word index of the opcode being executed; faults are reported here.
    pub(crate) current: usize,
    /// Instructions executed successfully.
    pub(crate) steps: u64,
}

impl<'a> VM<'a> {
    /// Create a VM positioned at the configured entry point.
    pub fn new(program: &'a Program, config: VmConfig) -> Self {
        Self {
            program,
            stack: Stack::with_capacity(config.stack_capacity),
            pc: config.entry_point,
            fp: -1,
            state: State::Running,
            current: config.entry_point,
            steps: 0,
        }
    }

    pub fn program_counter(&self) -> usize {
        self.pc
    }

    /// Index of the top stack element, `-1` when empty.
    pub fn stack_pointer(&self) -> isize {
        self.stack.pointer()
    }

    pub fn frame_pointer(&self) -> i32 {
        self.fp
    }

    /// Live stack contents, bottom first.
    pub fn stack(&self) -> &[i32] {
        self.stack.as_slice()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Read the word at the program counter and advance past it.
    ///
    /// Used for opcodes and immediate operands alike.
    pub(crate) fn fetch(&mut self) -> Result<i32, RuntimeError> {
        let word = self
            .program
            .word(self.pc)
            .ok_or_else(|| self.program_out_of_bounds(self.pc as i64))?;
        self.pc += 1;
        Ok(word)
    }

    /// Set the program counter to a target taken from the instruction stream
    /// or the stack. A target at or past the end halts at the next loop-top.
    pub(crate) fn jump(&mut self, target: i32) -> Result<(), RuntimeError> {
        self.pc = usize::try_from(target)
            .map_err(|_| self.program_out_of_bounds(i64::from(target)))?;
        Ok(())
    }

    pub(crate) fn push(&mut self, value: i32) -> Result<(), RuntimeError> {
        self.stack.push(value).map_err(|e| e.at(self.current))
    }

    pub(crate) fn pop(&mut self) -> Result<i32, RuntimeError> {
        self.stack.pop().map_err(|e| e.at(self.current))
    }

    pub(crate) fn peek(&self) -> Result<i32, RuntimeError> {
        self.stack.peek().map_err(|e| e.at(self.current))
    }

    /// The program counter as a stack value (for saving a return address).
    pub(crate) fn pc_as_value(&self) -> Result<i32, RuntimeError> {
        i32::try_from(self.pc).map_err(|_| self.program_out_of_bounds(self.pc as i64))
    }

    /// The stack pointer as a stack value (for establishing a frame base).
    pub(crate) fn stack_pointer_as_value(&self) -> Result<i32, RuntimeError> {
        i32::try_from(self.stack.pointer()).map_err(|_| RuntimeError::StackOverflow {
            at: self.current,
            capacity: self.stack.capacity(),
        })
    }

    pub(crate) fn program_out_of_bounds(&self, index: i64) -> RuntimeError {
        RuntimeError::OutOfBounds {
            at: self.current,
            region: Region::Program,
            index,
            len: self.program.len(),
        }
    }

    pub(crate) fn stack_out_of_bounds(&self, index: i64) -> RuntimeError {
        RuntimeError::OutOfBounds {
            at: self.current,
            region: Region::Stack,
            index,
            len: self.stack.len(),
        }
    }
}
