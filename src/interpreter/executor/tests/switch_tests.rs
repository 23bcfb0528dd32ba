//! Tests for Switch statements

use super::helpers::{lines, output_of, run_ok};

#[test]
fn test_switch_first_match_no_fallthrough() {
    let source = "escolha 2 caso 1: escreva 10 caso 2: escreva 20 caso 2: escreva 30 outro: escreva 99";
    assert_eq!(output_of(source), "20\n");
}

#[test]
fn test_switch_default() {
    assert_eq!(output_of("escolha 5 caso 1: escreva 1 outro: escreva 99"), "99\n");
}

#[test]
fn test_switch_no_match_no_default() {
    let (output, store) = run_ok("escolha 5 caso 1: x := 1 caso 2: x := 2", "");
    assert_eq!(output, "");
    assert!(store.is_empty());
}

#[test]
fn test_switch_only_default() {
    assert_eq!(output_of("escolha 1 outro: escreva 7"), "7\n");
}

#[test]
fn test_switch_selector_evaluated_once() {
    let source = "escolha leia caso 1: escreva 1 caso 2: escreva 2 outro: escreva 0; escreva leia";
    let (output, _) = run_ok(source, "2 8");
    assert_eq!(output, lines(&[2, 8]));
}

#[test]
fn test_switch_cases_evaluated_until_match() {
    // Cases read 5 (no match) then 1 (match); the third case is never evaluated
    let source = "escolha 1 caso leia: escreva 10 caso leia: escreva 20 caso leia: escreva 30; escreva leia";
    let (output, _) = run_ok(source, "5 1 7");
    assert_eq!(output, lines(&[20, 7]));
}

#[test]
fn test_switch_case_body_block() {
    let source = r#"
x := 3;
escolha x * 2
  caso 6: { exiba "seis"; x := 0 }
  outro: exiba "outro";
escreva x
"#;
    assert_eq!(output_of(source), "seis\n0\n");
}
