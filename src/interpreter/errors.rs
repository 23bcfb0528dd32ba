//! Runtime fault types
//!
//! Every runtime fault is fatal: it aborts the whole execution and is handed
//! back to the driver. Unbound variables and unmatched Switch selectors are
//! defined behavior and never produce one of these.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Right operand of `/` evaluated to zero
    #[error("division by zero")]
    DivisionByZero,

    /// `leia` found no further token in the input stream
    #[error("input exhausted while reading an integer")]
    InputExhausted,

    /// `leia` found a token that is not a 32-bit integer
    #[error("expected an integer on input, found '{token}'")]
    MalformedInput { token: String },

    /// A `quebrar` signal reached the top level of the program still active
    #[error("'quebrar' left {remaining} more loop level(s) than were open")]
    BreakOverflow { remaining: u32 },

    #[error("failed to read input")]
    Input(#[source] io::Error),

    #[error("failed to write output")]
    Output(#[source] io::Error),
}

pub type ExecResult<T> = Result<T, RuntimeError>;
