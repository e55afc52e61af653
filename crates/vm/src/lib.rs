//! vsvm interpreter: executes untagged word streams on an operand stack.
//!
//! The machine has:
//! - A bounded operand stack of `i32` values
//! - A program counter into the instruction stream
//! - A frame pointer; call frames live on the operand stack itself
//!
//! # Usage
//!
//! ```
//! use vsvm_common::{Opcode, Program};
//! use vsvm_vm::run;
//!
//! let program = Program::new(vec![
//!     Opcode::Iconst as i32, 3,
//!     Opcode::Iconst as i32, 4,
//!     Opcode::Iadd as i32,
//!     Opcode::Halt as i32,
//! ]);
//!
//! let outcome = run(&program, 0, 100).unwrap();
//! assert_eq!(outcome.stack, vec![7]);
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod machine;
pub mod ops;
pub mod stack;
pub mod trace;

pub use config::{VmConfig, DEFAULT_STACK_CAPACITY};
pub use error::{Region, RuntimeError};
pub use execute::Outcome;
pub use machine::{HaltReason, State, VM};
pub use trace::{Event, LogTracer, NoopTracer, Recorder, Tracer};

use vsvm_common::Program;

/// Execute a program from `entry_point` with a stack of `stack_capacity`
/// slots, logging every step through `tracing`.
///
/// # Errors
///
/// Returns [`RuntimeError`] on stack overflow or underflow, an out-of-range
/// program counter or stack index, or an unknown opcode. Running off the end
/// of the program is a normal halt.
pub fn run(
    program: &Program,
    entry_point: usize,
    stack_capacity: usize,
) -> Result<Outcome, RuntimeError> {
    run_with_tracer(
        program,
        VmConfig::new(entry_point, stack_capacity),
        &mut LogTracer,
    )
}

/// Execute a program, reporting each step to `tracer`.
pub fn run_with_tracer(
    program: &Program,
    config: VmConfig,
    tracer: &mut dyn Tracer,
) -> Result<Outcome, RuntimeError> {
    let mut vm = VM::new(program, config);
    vm.run(tracer)
}
