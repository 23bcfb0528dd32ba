pub mod cli;
pub mod config;
pub mod interpreter;

// Re-export the interpreter entry points
pub use interpreter::{
    execute, parse_program, parse_program_with, ParseError, ParseOptions, Program, RuntimeError,
    Store,
};
