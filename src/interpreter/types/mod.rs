//! Type definitions for the interpreter
//!
//! - AST nodes (Program, Stmt, Expr, Cond)
//! - Control flow signal (Control)
//! - Variable store (Store)

pub mod ast;
pub mod control;
pub mod store;

pub use ast::{BinaryOp, Case, Cond, Expr, Program, RelOp, Span, Stmt};
pub use control::Control;
pub use store::Store;
