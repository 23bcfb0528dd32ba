//! Tests for arithmetic operators

use super::helpers::{lines, output_of, run_ok};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::executor::expressions::apply_binary;
use crate::interpreter::types::BinaryOp;

#[test]
fn test_basic_arithmetic() {
    assert_eq!(output_of("escreva 2 + 3"), "5\n");
    assert_eq!(output_of("escreva 2 - 3"), "-1\n");
    assert_eq!(output_of("escreva 6 * 7"), "42\n");
}

#[test]
fn test_division_truncates() {
    assert_eq!(output_of("escreva 7/2"), "3\n");
    assert_eq!(output_of("escreva -7/2"), "-3\n");
    assert_eq!(output_of("escreva 7/-2"), "-3\n");
}

#[test]
fn test_pow() {
    assert_eq!(output_of("escreva 2^10"), "1024\n");
    assert_eq!(output_of("escreva 0^0"), "1\n");
    assert_eq!(output_of("escreva 2^-1"), "0\n");
    assert_eq!(output_of("escreva -2^31"), "-2147483648\n");
}

#[test]
fn test_pow_saturates() {
    assert_eq!(output_of("escreva 2^31"), "2147483647\n");
    assert_eq!(output_of("escreva 10^100"), "2147483647\n");
}

#[test]
fn test_overflow_wraps() {
    assert_eq!(output_of("escreva 2147483647 + 1"), "-2147483648\n");
    assert_eq!(output_of("escreva -2147483648 - 1"), "2147483647\n");
    assert_eq!(output_of("escreva 65536 * 65536"), "0\n");
    assert_eq!(output_of("escreva -2147483648 / -1"), "-2147483648\n");
}

#[test]
fn test_precedence() {
    assert_eq!(output_of("escreva 2 + 3 * 4"), "14\n");
    assert_eq!(output_of("escreva 2 * 3 ^ 2"), "18\n");
    assert_eq!(output_of("escreva 10 - 4 - 3"), "3\n");
    assert_eq!(output_of("escreva 100 / 10 / 5"), "2\n");
    assert_eq!(output_of("escreva 2 ^ 3 ^ 2"), "512\n");
    assert_eq!(output_of("escreva (2 + 3) * 4"), "20\n");
}

#[test]
fn test_operands_evaluated_left_to_right() {
    let (output, _) = run_ok("escreva leia - leia; escreva leia / leia", "10 3\n20 4");
    assert_eq!(output, lines(&[7, 5]));
}

#[test]
fn test_apply_binary_direct() {
    assert_eq!(apply_binary(BinaryOp::Add, 1, 2).unwrap(), 3);
    assert_eq!(apply_binary(BinaryOp::Pow, 3, 4).unwrap(), 81);
    assert!(matches!(
        apply_binary(BinaryOp::Div, 1, 0),
        Err(RuntimeError::DivisionByZero)
    ));
}
