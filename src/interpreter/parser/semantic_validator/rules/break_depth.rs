//! Rule: Break Depth
//!
//! Warns when `quebrar N` asks to leave more loops than lexically enclose it.
//! If such a statement is reached the signal survives to the top level and
//! execution aborts.
//!
//! ```text
//! enquanto verdadeiro faca quebrar 2      // warning: only one loop
//! para i de 1 ate 3 faca escolha i caso 1: quebrar 1   // ok, the For absorbs it
//! ```

use crate::interpreter::types::{Program, Stmt};

use super::super::{ValidationError, ValidationRule};

pub struct BreakDepthRule;

impl ValidationRule for BreakDepthRule {
    fn id(&self) -> &'static str {
        "break-depth"
    }

    fn description(&self) -> &'static str {
        "Break levels must not exceed the number of enclosing loops"
    }

    fn validate(&self, program: &Program, _source: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for stmt in &program.body {
            check_stmt(stmt, 0, &mut errors, self.id());
        }
        errors
    }
}

fn check_stmt(stmt: &Stmt, depth: u32, errors: &mut Vec<ValidationError>, rule_id: &'static str) {
    match stmt {
        Stmt::Break { level, span } => {
            if level.get() > depth {
                errors.push(ValidationError::warning(
                    *span,
                    format!(
                        "'quebrar {}' is inside {} loop(s) and will abort the program",
                        level, depth
                    ),
                    rule_id,
                ));
            }
        }

        Stmt::While { body, .. } | Stmt::For { body, .. } => {
            check_stmt(body, depth + 1, errors, rule_id);
        }

        Stmt::If { then_s, else_s, .. } => {
            check_stmt(then_s, depth, errors, rule_id);
            check_stmt(else_s, depth, errors, rule_id);
        }

        // Switch is not a loop
        Stmt::Switch { cases, default, .. } => {
            for case in cases {
                check_stmt(&case.body, depth, errors, rule_id);
            }
            if let Some(body) = default {
                check_stmt(body, depth, errors, rule_id);
            }
        }

        Stmt::Block { body, .. } => {
            for stmt in body {
                check_stmt(stmt, depth, errors, rule_id);
            }
        }

        Stmt::Assign { .. } | Stmt::Skip { .. } | Stmt::PrintValue { .. } | Stmt::PrintText { .. } => {}
    }
}
