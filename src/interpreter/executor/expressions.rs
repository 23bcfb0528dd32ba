//! Expression and condition evaluation
//!
//! Operands are always evaluated left to right. `leia` is the only node with a
//! side effect, so evaluation order and short-circuiting are observable and
//! must be kept exactly.

use super::super::errors::{ExecResult, RuntimeError};
use super::super::types::{BinaryOp, Cond, Expr, RelOp};
use super::VM;

/* ===================== Expressions ===================== */

/// Evaluate an expression to an integer
pub fn eval_expr(vm: &mut VM, expr: &Expr) -> ExecResult<i32> {
    match expr {
        Expr::Int { v } => Ok(*v),

        Expr::Var { name, .. } => Ok(vm.store.get(name)),

        Expr::Read { .. } => vm.read_int(),

        Expr::Binary { op, left, right } => {
            let left = eval_expr(vm, left)?;
            let right = eval_expr(vm, right)?;
            apply_binary(*op, left, right)
        }
    }
}

/// Combine two evaluated operands
///
/// `+ - *` wrap on overflow. `/` truncates toward zero. `^` goes through f64
/// and truncates back, so large results lose precision or saturate.
pub fn apply_binary(op: BinaryOp, left: i32, right: i32) -> ExecResult<i32> {
    match op {
        BinaryOp::Add => Ok(left.wrapping_add(right)),
        BinaryOp::Sub => Ok(left.wrapping_sub(right)),
        BinaryOp::Mul => Ok(left.wrapping_mul(right)),
        BinaryOp::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(left.wrapping_div(right))
        }
        BinaryOp::Pow => Ok(f64::from(left).powf(f64::from(right)) as i32),
    }
}

/* ===================== Conditions ===================== */

/// Evaluate a condition to a boolean
///
/// `e` and `ou` short-circuit: the right operand is evaluated only when the
/// left one does not decide the result. `xor` always evaluates both.
pub fn eval_cond(vm: &mut VM, cond: &Cond) -> ExecResult<bool> {
    match cond {
        Cond::Bool { v } => Ok(*v),

        Cond::Rel { op, left, right } => {
            let left = eval_expr(vm, left)?;
            let right = eval_expr(vm, right)?;
            Ok(compare(*op, left, right))
        }

        Cond::Not { inner } => Ok(!eval_cond(vm, inner)?),

        Cond::And { left, right } => Ok(eval_cond(vm, left)? && eval_cond(vm, right)?),

        Cond::Or { left, right } => Ok(eval_cond(vm, left)? || eval_cond(vm, right)?),

        Cond::Xor { left, right } => {
            let left = eval_cond(vm, left)?;
            let right = eval_cond(vm, right)?;
            Ok(left != right)
        }

        Cond::Paren { inner } => eval_cond(vm, inner),
    }
}

pub fn compare(op: RelOp, left: i32, right: i32) -> bool {
    match op {
        RelOp::Eq => left == right,
        RelOp::Le => left <= right,
        RelOp::Ge => left >= right,
        RelOp::Ne => left != right,
    }
}
