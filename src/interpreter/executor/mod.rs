//! # Executor - Recursive Tree-Walking Interpreter
//!
//! ## Core Principles
//!
//! 1. **Depth-first recursion**: one function per node family, dispatching on the variant
//! 2. **Explicit state**: the Store and the I/O streams live in a [`VM`] passed by reference
//! 3. **Signals as values**: statements return [`Control`]; only loops intercept `Break`
//! 4. **Fatal faults**: any [`RuntimeError`] aborts the whole execution

pub mod expressions;
pub mod input;
pub mod statements;

#[cfg(test)]
mod tests;

use std::io::{BufRead, Write};

use tracing::debug;

use super::errors::{ExecResult, RuntimeError};
use super::types::{Control, Program, Store};
use input::InputTokens;

// Re-export commonly used items from submodules
pub use expressions::{eval_cond, eval_expr};
pub use statements::{execute_sequence, execute_statement};

/* ===================== VM ===================== */

/// Virtual Machine state for one program execution
///
/// Created empty at the start of execution and discarded at the end.
pub struct VM<'io> {
    /// Global variable namespace
    pub store: Store,
    input: InputTokens<'io>,
    output: &'io mut dyn Write,
}

impl<'io> VM<'io> {
    pub fn new(input: &'io mut dyn BufRead, output: &'io mut dyn Write) -> Self {
        VM {
            store: Store::new(),
            input: InputTokens::new(input),
            output,
        }
    }

    /// Execute a whole program
    ///
    /// A `Break` that survives the top-level sequence had no loop to absorb it
    /// and is reported as [`RuntimeError::BreakOverflow`].
    pub fn run(&mut self, program: &Program) -> ExecResult<()> {
        debug!(statements = program.body.len(), "executing program");

        let control = execute_sequence(self, &program.body);
        self.flush()?;

        match control? {
            Control::Normal => {
                debug!(variables = self.store.len(), "program completed");
                Ok(())
            }
            Control::Break(level) => Err(RuntimeError::BreakOverflow {
                remaining: level.get(),
            }),
        }
    }

    pub fn into_store(self) -> Store {
        self.store
    }

    /// Read the next integer for `leia`, flushing pending output first
    pub(crate) fn read_int(&mut self) -> ExecResult<i32> {
        self.flush()?;
        self.input.next_int()
    }

    pub(crate) fn write_line(&mut self, line: &dyn std::fmt::Display) -> ExecResult<()> {
        writeln!(self.output, "{}", line).map_err(RuntimeError::Output)
    }

    fn flush(&mut self) -> ExecResult<()> {
        self.output.flush().map_err(RuntimeError::Output)
    }
}

/* ===================== Public API ===================== */

/// Execute `program` against the given input and output streams
///
/// Returns the final Store on normal completion. Output written before a
/// fault stays in `output`.
pub fn execute<R: BufRead, W: Write>(
    program: &Program,
    mut input: R,
    mut output: W,
) -> ExecResult<Store> {
    let mut vm = VM::new(&mut input, &mut output);
    vm.run(program)?;
    Ok(vm.into_store())
}
