//! Test helpers for executor tests
//!
//! Common utilities for parsing programs and running them against in-memory
//! input and output.

use std::collections::BTreeMap;
use std::io::Cursor;

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::executor::execute;
use crate::interpreter::parser::semantic_validator::{validate_program, Severity, ValidationError};
use crate::interpreter::parser::{parse_program_with, ParseOptions};
use crate::interpreter::types::{Program, Store};

/// Everything observable about one execution
pub struct Outcome {
    /// Text written to the output stream, including output produced before a fault
    pub output: String,
    pub result: Result<Store, RuntimeError>,
    /// Validator diagnostics for the program, in source order
    pub diagnostics: Vec<ValidationError>,
}

/// Parse, validate, round-trip through JSON, and execute
///
/// This helper:
/// - Parses the source with the given options
/// - Validates it semantically (diagnostics are kept on the Outcome)
/// - Serializes and deserializes the Program (to test round-trip compatibility)
/// - Executes it with `input` as the input stream
pub fn run_with(source: &str, input: &str, options: ParseOptions) -> Outcome {
    let program = parse_program_with(source, &options).expect("Parse program failed");
    let diagnostics = validate_program(&program, source);
    let json = serde_json::to_string(&program).expect("Program serialization failed");
    let program: Program = serde_json::from_str(&json).expect("Program deserialization failed");

    let mut output = Vec::new();
    let result = execute(&program, Cursor::new(input.as_bytes()), &mut output);
    Outcome {
        output: String::from_utf8(output).expect("Output is not UTF-8"),
        result,
        diagnostics,
    }
}

pub fn run(source: &str, input: &str) -> Outcome {
    run_with(source, input, ParseOptions::default())
}

/// Run a program that must complete normally; returns its output and Store
pub fn run_ok(source: &str, input: &str) -> (String, Store) {
    let outcome = run(source, input);
    match outcome.result {
        Ok(store) => (outcome.output, store),
        Err(err) => panic!("Program faulted: {:?}\noutput so far:\n{}", err, outcome.output),
    }
}

/// Run a program that must fault; returns the output produced before the fault
pub fn run_err(source: &str, input: &str) -> (String, RuntimeError) {
    let outcome = run(source, input);
    match outcome.result {
        Err(err) => (outcome.output, err),
        Ok(store) => panic!("Expected a fault, program completed with {:?}", store),
    }
}

/// Rule ids of the warnings (not hints) the validator raised
pub fn warnings_of(outcome: &Outcome) -> Vec<&'static str> {
    outcome
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| d.rule_id)
        .collect()
}

/// Output of a program that needs no input
pub fn output_of(source: &str) -> String {
    run_ok(source, "").0
}

/// Expected output: one line per item
pub fn lines<T: ToString>(items: &[T]) -> String {
    items.iter().map(|item| format!("{}\n", item.to_string())).collect()
}

/// Build an expected Store from `name => value` pairs
pub fn store_of(entries: BTreeMap<&str, i32>) -> Store {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
