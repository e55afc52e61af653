//! Fetch-decode-execute loop and opcode dispatch.

use crate::error::RuntimeError;
use crate::machine::{HaltReason, State, VM};
use crate::ops::{BinaryOp, BranchCondition};
use crate::trace::{Event, Tracer};
use vsvm_common::Opcode;

/// Result of a run that halted without faulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Stack contents at halt, bottom first.
    pub stack: Vec<i32>,
    pub reason: HaltReason,
    /// Instructions executed.
    pub steps: u64,
}

impl<'a> VM<'a> {
    /// Execute until the VM halts or faults.
    ///
    /// Calling this again on a finished VM reports the same terminal state
    /// without executing anything.
    pub fn run(&mut self, tracer: &mut dyn Tracer) -> Result<Outcome, RuntimeError> {
        loop {
            let reason = match self.step(tracer) {
                State::Running => continue,
                State::Halted(reason) => *reason,
                State::Faulted(error) => return Err(error.clone()),
            };
            return Ok(Outcome {
                stack: self.stack.as_slice().to_vec(),
                reason,
                steps: self.steps,
            });
        }
    }

    /// Execute one instruction and return the resulting state.
    ///
    /// Terminal states are sticky: once halted or faulted, no further words
    /// are fetched.
    pub fn step(&mut self, tracer: &mut dyn Tracer) -> &State {
        if !self.state.is_running() {
            return &self.state;
        }

        // Only the entry point can start past the end; a jump there halts.
        let len = self.program.len();
        if self.steps == 0 && self.pc > len {
            let error = self.program_out_of_bounds(self.pc as i64);
            tracer.on_fault(&error);
            self.state = State::Faulted(error);
            return &self.state;
        }
        if self.pc >= len {
            self.state = State::Halted(HaltReason::EndOfProgram);
            return &self.state;
        }

        self.current = self.pc;
        tracer.before_step(self.pc, self.stack.as_slice());

        match self.execute_one(tracer) {
            Ok(event) => {
                self.steps += 1;
                tracer.on_event(&event);
                tracer.after_step(self.stack.as_slice());
            }
            Err(error) => {
                tracer.on_fault(&error);
                self.state = State::Faulted(error);
            }
        }
        &self.state
    }

    fn execute_one(&mut self, tracer: &mut dyn Tracer) -> Result<Event, RuntimeError> {
        let word = self.fetch()?;
        let opcode = Opcode::try_from(word).map_err(|_| RuntimeError::UnknownOpcode {
            at: self.current,
            value: word,
        })?;

        match opcode {
            Opcode::Iconst => self.exec_iconst(),

            Opcode::Iadd => self.exec_binary(BinaryOp::Add),
            Opcode::Isub => self.exec_binary(BinaryOp::Sub),
            Opcode::Imul => self.exec_binary(BinaryOp::Mul),
            Opcode::Ilt => self.exec_binary(BinaryOp::Lt),
            Opcode::Igt => self.exec_binary(BinaryOp::Gt),
            Opcode::Ieq => self.exec_binary(BinaryOp::Eq),
            Opcode::Ineq => self.exec_binary(BinaryOp::Neq),

            Opcode::Brt => self.exec_branch(BranchCondition::IfTrue),
            Opcode::Brf => self.exec_branch(BranchCondition::IfFalse),
            Opcode::Call => self.exec_call(),
            Opcode::Ret => self.exec_ret(),

            Opcode::Load => self.exec_load(),
            Opcode::Print => self.exec_print(tracer),
            Opcode::Halt => self.exec_halt(),
        }
    }

    fn exec_iconst(&mut self) -> Result<Event, RuntimeError> {
        let value = self.fetch()?;
        self.push(value)?;
        Ok(Event::Iconst { value })
    }

    /// Pop `b`, pop `a`, push `op(a, b)`.
    fn exec_binary(&mut self, op: BinaryOp) -> Result<Event, RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        let result = op.apply(a, b);
        self.push(result)?;
        Ok(Event::Binary { op, a, b, result })
    }

    fn exec_branch(&mut self, condition: BranchCondition) -> Result<Event, RuntimeError> {
        let target = self.fetch()?;
        let flag = self.pop()?;
        let taken = condition.holds(flag);
        if taken {
            self.jump(target)?;
        }
        Ok(Event::Branch {
            condition,
            flag,
            target,
            taken,
        })
    }

    /// Push `arg_count`, the caller's frame pointer and the return address,
    /// then make the return-address slot the new frame base.
    ///
    /// With `n` arguments, argument `i` sits at offset `i - n - 2` from the
    /// new frame pointer, so the last argument is `LOAD -3`.
    fn exec_call(&mut self) -> Result<Event, RuntimeError> {
        let target = self.fetch()?;
        let arg_count = self.fetch()?;

        let args = usize::try_from(arg_count)
            .map_err(|_| self.stack_out_of_bounds(i64::from(arg_count)))?;
        if args > self.stack.len() {
            return Err(RuntimeError::StackUnderflow { at: self.current });
        }

        let return_to = self.pc_as_value()?;
        self.push(arg_count)?;
        self.push(self.fp)?;
        self.push(return_to)?;
        self.fp = self.stack_pointer_as_value()?;
        self.jump(target)?;

        Ok(Event::Call { target, arg_count })
    }

    /// Unwind the current frame: keep the result, restore the caller's
    /// program counter and frame pointer, drop the arguments, push the result.
    fn exec_ret(&mut self) -> Result<Event, RuntimeError> {
        let value = self.pop()?;

        let base = usize::try_from(i64::from(self.fp) + 1)
            .map_err(|_| self.stack_out_of_bounds(i64::from(self.fp)))?;
        self.stack.truncate(base).map_err(|e| e.at(self.current))?;

        let return_to = self.pop()?;
        let saved_fp = self.pop()?;
        let arg_count = self.pop()?;

        let args = usize::try_from(arg_count)
            .map_err(|_| self.stack_out_of_bounds(i64::from(arg_count)))?;
        self.stack.discard(args).map_err(|e| e.at(self.current))?;

        self.fp = saved_fp;
        self.jump(return_to)?;
        self.push(value)?;

        Ok(Event::Ret { value, return_to })
    }

    /// Push the slot at `frame_pointer + offset`.
    fn exec_load(&mut self) -> Result<Event, RuntimeError> {
        let offset = self.fetch()?;
        let index = i64::from(self.fp) + i64::from(offset);
        let value = self.stack.get(index).map_err(|e| e.at(self.current))?;
        self.push(value)?;
        Ok(Event::Load { offset, value })
    }

    fn exec_print(&mut self, tracer: &mut dyn Tracer) -> Result<Event, RuntimeError> {
        let value = self.peek()?;
        tracer.on_print(value);
        Ok(Event::Print { value })
    }

    fn exec_halt(&mut self) -> Result<Event, RuntimeError> {
        self.state = State::Halted(HaltReason::Instruction);
        Ok(Event::Halt)
    }
}
