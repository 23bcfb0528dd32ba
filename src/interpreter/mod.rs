//! Enquanto interpreter
//!
//! Source text goes through the [`parser`] to become a [`Program`], which the
//! [`executor`] walks once against an input and an output stream.

pub mod errors;
pub mod executor;
pub mod parser;
pub mod types;

pub use errors::{ExecResult, RuntimeError};
pub use executor::execute;
pub use parser::semantic_validator::{validate_program, Severity, ValidationError};
pub use parser::{parse_program, parse_program_with, ParseError, ParseOptions, SyntaxError};
pub use types::{Program, Store};
