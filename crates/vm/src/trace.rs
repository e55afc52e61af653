//! Observation hooks for the execution loop.
//!
//! The interpreter reports to a [`Tracer`] at fixed points of every step but
//! never reads anything back, so a tracer cannot influence execution.

use crate::error::RuntimeError;
use crate::ops::{BinaryOp, BranchCondition};
use std::fmt;

/// Per-instruction record of the operands an instruction consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Iconst {
        value: i32,
    },
    Binary {
        op: BinaryOp,
        a: i32,
        b: i32,
        result: i32,
    },
    Branch {
        condition: BranchCondition,
        flag: i32,
        target: i32,
        taken: bool,
    },
    Call {
        target: i32,
        arg_count: i32,
    },
    Ret {
        value: i32,
        return_to: i32,
    },
    Load {
        offset: i32,
        value: i32,
    },
    Print {
        value: i32,
    },
    Halt,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Iconst { value } => write!(f, "iconst {value}"),
            Event::Binary { op, a, b, .. } => write!(f, "{op} {a} {b}"),
            Event::Branch {
                condition,
                flag,
                target,
                ..
            } => write!(f, "{} {flag} {target}", condition.mnemonic()),
            Event::Call { target, arg_count } => write!(f, "call {target} {arg_count}"),
            Event::Ret { value, .. } => write!(f, "ret {value}"),
            Event::Load { offset, value } => write!(f, "load {offset} = {value}"),
            Event::Print { value } => write!(f, "print {value}"),
            Event::Halt => write!(f, "halt"),
        }
    }
}

/// Receives a record of each executed step. Every hook defaults to a no-op.
pub trait Tracer {
    /// Called after the loop-top checks, before the opcode word is fetched.
    fn before_step(&mut self, _pc: usize, _stack: &[i32]) {}

    /// Called once the instruction has executed successfully.
    fn on_event(&mut self, _event: &Event) {}

    /// Called after a successful instruction with the resulting stack.
    fn after_step(&mut self, _stack: &[i32]) {}

    /// Output of the PRINT instruction.
    fn on_print(&mut self, _value: i32) {}

    /// Called when a step faults. No further steps follow.
    fn on_fault(&mut self, _error: &RuntimeError) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Forwards every hook to the `tracing` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn before_step(&mut self, pc: usize, stack: &[i32]) {
        tracing::debug!(pc, ?stack, "step");
    }

    fn on_event(&mut self, event: &Event) {
        tracing::debug!("{event}");
    }

    fn after_step(&mut self, stack: &[i32]) {
        tracing::debug!(?stack, "stack");
    }

    fn on_print(&mut self, value: i32) {
        tracing::info!(value, "print");
    }

    fn on_fault(&mut self, error: &RuntimeError) {
        tracing::error!(%error, "execution faulted");
    }
}

/// Keeps everything it is told, for inspection after a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorder {
    /// (pc, stack) at the start of each step.
    pub before: Vec<(usize, Vec<i32>)>,
    pub events: Vec<Event>,
    /// Stack after each successful step.
    pub after: Vec<Vec<i32>>,
    pub printed: Vec<i32>,
    pub faults: Vec<RuntimeError>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable lines for the recorded events.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl Tracer for Recorder {
    fn before_step(&mut self, pc: usize, stack: &[i32]) {
        self.before.push((pc, stack.to_vec()));
    }

    fn on_event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }

    fn after_step(&mut self, stack: &[i32]) {
        self.after.push(stack.to_vec());
    }

    fn on_print(&mut self, value: i32) {
        self.printed.push(value);
    }

    fn on_fault(&mut self, error: &RuntimeError) {
        self.faults.push(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_lines() {
        assert_eq!(Event::Iconst { value: 3 }.to_string(), "iconst 3");
        assert_eq!(
            Event::Binary {
                op: BinaryOp::Add,
                a: 3,
                b: 4,
                result: 7
            }
            .to_string(),
            "iadd 3 4"
        );
        assert_eq!(
            Event::Branch {
                condition: BranchCondition::IfFalse,
                flag: 0,
                target: 12,
                taken: true
            }
            .to_string(),
            "brf 0 12"
        );
        assert_eq!(
            Event::Call {
                target: 8,
                arg_count: 2
            }
            .to_string(),
            "call 8 2"
        );
        assert_eq!(
            Event::Ret {
                value: 30,
                return_to: 7
            }
            .to_string(),
            "ret 30"
        );
        assert_eq!(
            Event::Load {
                offset: -3,
                value: 20
            }
            .to_string(),
            "load -3 = 20"
        );
        assert_eq!(Event::Print { value: 7 }.to_string(), "print 7");
        assert_eq!(Event::Halt.to_string(), "halt");
    }

    #[test]
    fn recorder_collects_hooks() {
        let mut recorder = Recorder::new();
        recorder.before_step(0, &[]);
        recorder.on_event(&Event::Iconst { value: 1 });
        recorder.after_step(&[1]);
        recorder.on_print(1);
        assert_eq!(recorder.before, vec![(0, vec![])]);
        assert_eq!(recorder.lines(), vec!["iconst 1".to_string()]);
        assert_eq!(recorder.after, vec![vec![1]]);
        assert_eq!(recorder.printed, vec![1]);
        assert!(recorder.faults.is_empty());
    }
}
