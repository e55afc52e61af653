//! Per-run interpreter configuration.

/// Operand stack size used when the caller does not choose one.
pub const DEFAULT_STACK_CAPACITY: usize = 100;

/// Settings fixed for the lifetime of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// Word index of the first instruction to execute.
    pub entry_point: usize,
    /// Maximum number of values the operand stack may hold.
    pub stack_capacity: usize,
}

impl VmConfig {
    pub fn new(entry_point: usize, stack_capacity: usize) -> Self {
        Self {
            entry_point,
            stack_capacity,
        }
    }

    pub fn with_entry_point(mut self, entry_point: usize) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn with_stack_capacity(mut self, stack_capacity: usize) -> Self {
        self.stack_capacity = stack_capacity;
        self
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        Self::new(0, DEFAULT_STACK_CAPACITY)
    }
}
