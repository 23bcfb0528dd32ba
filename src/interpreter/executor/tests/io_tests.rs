//! Tests for the input and output streams

use std::io::{self, Cursor, Write};

use super::helpers::{lines, run_err, run_ok};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::executor::execute;
use crate::interpreter::parser::parse_program;

#[test]
fn test_read_tokens_across_lines() {
    let (output, store) = run_ok("a := leia; b := leia; escreva a + b", "3\n4\n");
    assert_eq!(output, "7\n");
    assert_eq!(store.get("a"), 3);
    assert_eq!(store.get("b"), 4);
}

#[test]
fn test_read_tokens_on_one_line() {
    let (output, _) = run_ok("escreva leia; escreva leia; escreva leia", "  -1 0\t42  ");
    assert_eq!(output, lines(&[-1, 0, 42]));
}

#[test]
fn test_print_text() {
    let (output, _) = run_ok(r#"exiba "ola mundo"; exiba "x := 1; escreva 2""#, "");
    assert_eq!(output, "ola mundo\nx := 1; escreva 2\n");
}

#[test]
fn test_output_interleaves_in_execution_order() {
    let source = r#"exiba "inicio"; para i de 1 ate 2 faca { exiba "i ="; escreva i }; exiba "fim""#;
    let (output, _) = run_ok(source, "");
    assert_eq!(output, "inicio\ni =\n1\ni =\n2\nfim\n");
}

#[test]
fn test_input_exhausted_keeps_prior_output() {
    let (output, err) = run_err("escreva 1; escreva leia; escreva 3", "");
    assert_eq!(output, "1\n");
    assert!(matches!(err, RuntimeError::InputExhausted));
}

#[test]
fn test_malformed_input() {
    let (_, err) = run_err("x := leia", "abc");
    match err {
        RuntimeError::MalformedInput { token } => assert_eq!(token, "abc"),
        other => panic!("Expected MalformedInput, got {:?}", other),
    }
}

#[test]
fn test_execute_returns_final_store() {
    let program = parse_program("x := leia * 2; y := x + 1").unwrap();
    let mut output = Vec::new();
    let store = execute(&program, Cursor::new("21"), &mut output).unwrap();
    assert_eq!(store.get("x"), 42);
    assert_eq!(store.get("y"), 43);
    assert!(output.is_empty());
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_output_failure_is_a_fault() {
    let program = parse_program("escreva 1").unwrap();
    let result = execute(&program, Cursor::new(""), BrokenPipe);
    assert!(matches!(result, Err(RuntimeError::Output(_))));
}
