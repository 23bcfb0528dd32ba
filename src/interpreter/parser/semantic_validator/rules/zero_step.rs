//! Rule: Zero Step
//!
//! Warns about `para ... passo 0 ...`. With a zero step the loop variable
//! never moves, so the loop only ends if the body rebinds the variable or
//! breaks out.

use crate::interpreter::types::{Expr, Program, Stmt};

use super::super::{ValidationError, ValidationRule};

pub struct ZeroStepRule;

impl ValidationRule for ZeroStepRule {
    fn id(&self) -> &'static str {
        "zero-step"
    }

    fn description(&self) -> &'static str {
        "For loops should not use a literal step of 0"
    }

    fn validate(&self, program: &Program, _source: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for stmt in &program.body {
            check_stmt(stmt, &mut errors, self.id());
        }
        errors
    }
}

fn check_stmt(stmt: &Stmt, errors: &mut Vec<ValidationError>, rule_id: &'static str) {
    match stmt {
        Stmt::For {
            var,
            step,
            body,
            span,
            ..
        } => {
            if let Some(Expr::Int { v: 0 }) = step {
                errors.push(ValidationError::warning(
                    *span,
                    format!("loop over '{}' has step 0 and may never terminate", var),
                    rule_id,
                ));
            }
            check_stmt(body, errors, rule_id);
        }

        Stmt::While { body, .. } => check_stmt(body, errors, rule_id),

        Stmt::If { then_s, else_s, .. } => {
            check_stmt(then_s, errors, rule_id);
            check_stmt(else_s, errors, rule_id);
        }

        Stmt::Switch { cases, default, .. } => {
            for case in cases {
                check_stmt(&case.body, errors, rule_id);
            }
            if let Some(body) = default {
                check_stmt(body, errors, rule_id);
            }
        }

        Stmt::Block { body, .. } => {
            for stmt in body {
                check_stmt(stmt, errors, rule_id);
            }
        }

        _ => {}
    }
}
