//! Rule: Unassigned Variable
//!
//! Hints at variables that are read somewhere but never written anywhere in
//! the program. Such reads are well defined (they yield 0) but usually point
//! at a typo.
//!
//! ```text
//! total := 0; escreva totl     // hint: 'totl' is never assigned
//! ```
//!
//! Assignment order is not considered: a variable written anywhere, including
//! as a For loop variable, counts as assigned everywhere.

use std::collections::HashSet;

use crate::interpreter::types::{Cond, Expr, Program, Span, Stmt};

use super::super::{ValidationError, ValidationRule};

pub struct UnassignedVariableRule;

impl ValidationRule for UnassignedVariableRule {
    fn id(&self) -> &'static str {
        "unassigned-variable"
    }

    fn description(&self) -> &'static str {
        "Variables that are read should be assigned somewhere"
    }

    fn validate(&self, program: &Program, _source: &str) -> Vec<ValidationError> {
        let mut names = Names::default();
        for stmt in &program.body {
            names.collect_stmt(stmt);
        }

        names
            .reads
            .into_iter()
            .filter(|(name, _)| !names.assigned.contains(name.as_str()))
            .map(|(name, span)| {
                ValidationError::hint(
                    span,
                    format!("'{}' is never assigned and always reads 0", name),
                    self.id(),
                )
            })
            .collect()
    }
}

// ============================================================================
// AST Traversal
// ============================================================================

#[derive(Default)]
struct Names {
    assigned: HashSet<String>,
    /// Every variable read, in source order
    reads: Vec<(String, Span)>,
}

impl Names {
    fn collect_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { name, expr, .. } => {
                self.assigned.insert(name.clone());
                self.collect_expr(expr);
            }

            Stmt::If {
                test,
                then_s,
                else_s,
                ..
            } => {
                self.collect_cond(test);
                self.collect_stmt(then_s);
                self.collect_stmt(else_s);
            }

            Stmt::While { test, body, .. } => {
                self.collect_cond(test);
                self.collect_stmt(body);
            }

            Stmt::For {
                var,
                start,
                end,
                step,
                body,
                ..
            } => {
                self.assigned.insert(var.clone());
                self.collect_expr(start);
                self.collect_expr(end);
                if let Some(step) = step {
                    self.collect_expr(step);
                }
                self.collect_stmt(body);
            }

            Stmt::Switch {
                selector,
                cases,
                default,
                ..
            } => {
                self.collect_expr(selector);
                for case in cases {
                    self.collect_expr(&case.value);
                    self.collect_stmt(&case.body);
                }
                if let Some(body) = default {
                    self.collect_stmt(body);
                }
            }

            Stmt::PrintValue { expr, .. } => self.collect_expr(expr),

            Stmt::Block { body, .. } => {
                for stmt in body {
                    self.collect_stmt(stmt);
                }
            }

            Stmt::Skip { .. } | Stmt::Break { .. } | Stmt::PrintText { .. } => {}
        }
    }

    fn collect_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Var { name, span } => self.reads.push((name.clone(), *span)),
            Expr::Binary { left, right, .. } => {
                self.collect_expr(left);
                self.collect_expr(right);
            }
            Expr::Int { .. } | Expr::Read { .. } => {}
        }
    }

    fn collect_cond(&mut self, cond: &Cond) {
        match cond {
            Cond::Bool { .. } => {}
            Cond::Rel { left, right, .. } => {
                self.collect_expr(left);
                self.collect_expr(right);
            }
            Cond::Not { inner } | Cond::Paren { inner } => self.collect_cond(inner),
            Cond::And { left, right } | Cond::Or { left, right } | Cond::Xor { left, right } => {
                self.collect_cond(left);
                self.collect_cond(right);
            }
        }
    }
}
