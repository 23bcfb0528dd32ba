//! Statement execution handlers
//!
//! Each statement variant has its own handler. Handlers return the
//! [`Control`] outcome; a `Break` propagates upward through every non-loop
//! construct unchanged until a While or For intercepts it.

use std::num::NonZeroU32;

use tracing::trace;

use super::super::errors::ExecResult;
use super::super::types::{Case, Cond, Control, Expr, Stmt};
use super::expressions::{eval_cond, eval_expr};
use super::VM;

/* ===================== Dispatch ===================== */

/// Execute a sequence of statements in order
///
/// Stops at the first `Break` and hands it to the caller.
pub fn execute_sequence(vm: &mut VM, body: &[Stmt]) -> ExecResult<Control> {
    for stmt in body {
        let control = execute_statement(vm, stmt)?;
        if control != Control::Normal {
            return Ok(control);
        }
    }
    Ok(Control::Normal)
}

/// Execute a single statement
pub fn execute_statement(vm: &mut VM, stmt: &Stmt) -> ExecResult<Control> {
    match stmt {
        Stmt::Assign { name, expr, .. } => {
            let value = eval_expr(vm, expr)?;
            vm.store.set(name, value);
            Ok(Control::Normal)
        }

        Stmt::If {
            test,
            then_s,
            else_s,
            ..
        } => {
            if eval_cond(vm, test)? {
                execute_statement(vm, then_s)
            } else {
                execute_statement(vm, else_s)
            }
        }

        Stmt::Skip { .. } => Ok(Control::Normal),

        Stmt::Break { level, .. } => Ok(Control::Break(*level)),

        Stmt::PrintValue { expr, .. } => {
            let value = eval_expr(vm, expr)?;
            vm.write_line(&value)?;
            Ok(Control::Normal)
        }

        Stmt::PrintText { text, .. } => {
            vm.write_line(text)?;
            Ok(Control::Normal)
        }

        Stmt::While { test, body, .. } => execute_while(vm, test, body),

        Stmt::For {
            var,
            start,
            end,
            step,
            body,
            ..
        } => execute_for(vm, var, start, end, step.as_ref(), body),

        Stmt::Switch {
            selector,
            cases,
            default,
            ..
        } => execute_switch(vm, selector, cases, default.as_deref()),

        Stmt::Block { body, .. } => execute_sequence(vm, body),
    }
}

/* ===================== Loops ===================== */

/// Execute a While loop
///
/// The test is re-evaluated before every iteration.
fn execute_while(vm: &mut VM, test: &Cond, body: &Stmt) -> ExecResult<Control> {
    while eval_cond(vm, test)? {
        if let Control::Break(level) = execute_statement(vm, body)? {
            return Ok(exit_loop("while", level));
        }
    }
    Ok(Control::Normal)
}

/// Execute a For loop
///
/// Bounds and step are evaluated once, in the order start, end, step. The
/// loop variable lives in the Store: after each iteration it is re-read (the
/// body may have rebound it) and the step added to that value.
///
/// The addition wraps, so a loop whose end bound is near `i32::MAX` (or
/// `i32::MIN` when descending) wraps around and keeps going until a `quebrar`.
fn execute_for(
    vm: &mut VM,
    var: &str,
    start: &Expr,
    end: &Expr,
    step: Option<&Expr>,
    body: &Stmt,
) -> ExecResult<Control> {
    let mut current = eval_expr(vm, start)?;
    let end = eval_expr(vm, end)?;
    let step = match step {
        Some(expr) => eval_expr(vm, expr)?,
        None => 1,
    };

    let ascending = step > 0;
    let in_range = |current: i32| if ascending { current <= end } else { current >= end };

    while in_range(current) {
        vm.store.set(var, current);
        if let Control::Break(level) = execute_statement(vm, body)? {
            return Ok(exit_loop("for", level));
        }
        current = vm.store.get(var).wrapping_add(step);
    }
    Ok(Control::Normal)
}

/// Terminate a loop on a `Break`, consuming one level of it
fn exit_loop(kind: &'static str, level: NonZeroU32) -> Control {
    let control = Control::leave_loop(level);
    trace!(loop_kind = kind, level = level.get(), absorbed = (control == Control::Normal), "break left loop");
    control
}

/* ===================== Switch ===================== */

/// Execute a Switch statement
///
/// The selector is evaluated once and cases are tried in order; the first
/// equal case runs and scanning stops. Switch is not a loop, so a `Break`
/// raised by the chosen body passes straight through.
fn execute_switch(
    vm: &mut VM,
    selector: &Expr,
    cases: &[Case],
    default: Option<&Stmt>,
) -> ExecResult<Control> {
    let selected = eval_expr(vm, selector)?;

    for case in cases {
        if eval_expr(vm, &case.value)? == selected {
            return execute_statement(vm, &case.body);
        }
    }

    match default {
        Some(body) => execute_statement(vm, body),
        None => Ok(Control::Normal),
    }
}
