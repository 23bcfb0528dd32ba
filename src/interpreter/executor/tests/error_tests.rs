//! Tests for fatal runtime faults

use super::helpers::{run_err, run_ok};
use crate::interpreter::errors::RuntimeError;

#[test]
fn test_division_by_zero_aborts() {
    let (output, err) = run_err("escreva 1; escreva 5/0; escreva 2", "");
    assert_eq!(output, "1\n");
    assert!(matches!(err, RuntimeError::DivisionByZero));
}

#[test]
fn test_division_by_zero_variable() {
    let (_, err) = run_err("y := 1 / x", "");
    assert!(matches!(err, RuntimeError::DivisionByZero));
}

#[test]
fn test_fault_inside_loop_aborts_everything() {
    let source = "para i de 3 ate -3 passo -1 faca escreva 6 / i; escreva 100";
    let (output, err) = run_err(source, "");
    assert_eq!(output, "2\n3\n6\n");
    assert!(matches!(err, RuntimeError::DivisionByZero));
}

#[test]
fn test_fault_inside_condition() {
    let (output, err) = run_err("se 1 / 0 = 1 entao escreva 1 senao escreva 2", "");
    assert_eq!(output, "");
    assert!(matches!(err, RuntimeError::DivisionByZero));
}

#[test]
fn test_unmatched_switch_and_unbound_reads_are_not_faults() {
    let (output, _) = run_ok("escolha q caso 1: escreva 1; escreva q", "");
    assert_eq!(output, "0\n");
}

#[test]
fn test_fault_messages() {
    assert_eq!(RuntimeError::DivisionByZero.to_string(), "division by zero");
    assert_eq!(
        RuntimeError::InputExhausted.to_string(),
        "input exhausted while reading an integer"
    );
    assert_eq!(
        RuntimeError::MalformedInput {
            token: "x1".to_string()
        }
        .to_string(),
        "expected an integer on input, found 'x1'"
    );
    assert_eq!(
        RuntimeError::BreakOverflow { remaining: 2 }.to_string(),
        "'quebrar' left 2 more loop level(s) than were open"
    );
}
