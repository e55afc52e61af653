//! Tracer used by `vsvm run`: PRINT goes to stdout, everything else to the
//! log.

use vsvm_vm::{Event, LogTracer, RuntimeError, Tracer};

#[derive(Debug, Default)]
pub struct ConsoleTracer {
    log: LogTracer,
}

impl Tracer for ConsoleTracer {
    fn before_step(&mut self, pc: usize, stack: &[i32]) {
        self.log.before_step(pc, stack);
    }

    fn on_event(&mut self, event: &Event) {
        self.log.on_event(event);
    }

    fn after_step(&mut self, stack: &[i32]) {
        self.log.after_step(stack);
    }

    fn on_print(&mut self, value: i32) {
        println!("{value}");
        self.log.on_print(value);
    }

    fn on_fault(&mut self, error: &RuntimeError) {
        self.log.on_fault(error);
    }
}
