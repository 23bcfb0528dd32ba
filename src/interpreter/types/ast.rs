//! Abstract Syntax Tree node types
//!
//! Three node families: statements (`Stmt`), integer expressions (`Expr`) and
//! boolean conditions (`Cond`). Nodes are immutable once built; the only state
//! that changes while a program runs lives in the [`Store`](super::Store).

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Source location span for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
    /// Start line (0-indexed)
    pub start_line: usize,
    /// Start column (0-indexed)
    pub start_col: usize,
    /// End line (0-indexed)
    pub end_line: usize,
    /// End column (0-indexed)
    pub end_col: usize,
}

impl Span {
    pub fn new(
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/* ===================== Program ===================== */

/// A complete program: statements executed in order against one fresh Store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Stmt>,
    #[serde(default, skip_serializing_if = "is_default_span")]
    pub span: Span,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self {
            body,
            span: Span::default(),
        }
    }
}

/* ===================== Statements ===================== */

/// Statement AST node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Stmt {
    /// `name := expr`
    Assign {
        name: String,
        expr: Expr,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `se test entao then_s senao else_s`
    ///
    /// The else branch always exists; `senaose` arms are nested Ifs placed here.
    If {
        test: Cond,
        then_s: Box<Stmt>,
        else_s: Box<Stmt>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    Skip {
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `quebrar level` - unwinds `level` enclosing loops
    Break {
        level: NonZeroU32,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `escreva expr`
    PrintValue {
        expr: Expr,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `exiba "text"` - `text` is stored without its quote delimiters
    PrintText {
        text: String,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    While {
        test: Cond,
        body: Box<Stmt>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `para var de start ate end passo step faca body`
    For {
        var: String,
        start: Expr,
        end: Expr,
        /// Absent means a step of 1
        step: Option<Expr>,
        body: Box<Stmt>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `escolha selector caso ... outro ...`
    Switch {
        selector: Expr,
        cases: Vec<Case>,
        default: Option<Box<Stmt>>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `{ ... }`
    Block {
        body: Vec<Stmt>,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
}

impl Stmt {
    /// Get the span of this statement
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign { span, .. } => *span,
            Stmt::If { span, .. } => *span,
            Stmt::Skip { span } => *span,
            Stmt::Break { span, .. } => *span,
            Stmt::PrintValue { span, .. } => *span,
            Stmt::PrintText { span, .. } => *span,
            Stmt::While { span, .. } => *span,
            Stmt::For { span, .. } => *span,
            Stmt::Switch { span, .. } => *span,
            Stmt::Block { span, .. } => *span,
        }
    }
}

/// One `caso value: body` arm of a Switch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub value: Expr,
    pub body: Stmt,
}

/* ===================== Expressions ===================== */

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Pow, // ^
}

/// Integer-valued expression AST node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Expr {
    Int {
        v: i32,
    },
    Var {
        name: String,
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    /// `leia` - blocking read of one integer from the input stream
    Read {
        #[serde(default, skip_serializing_if = "is_default_span")]
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/* ===================== Conditions ===================== */

/// Relational operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelOp {
    Eq, // =
    Le, // <=
    Ge, // >=
    Ne, // <>
}

/// Boolean-valued condition AST node
///
/// Booleans only exist inside conditions; they can never be stored in a variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Cond {
    Bool {
        v: bool,
    },
    Rel {
        op: RelOp,
        left: Expr,
        right: Expr,
    },
    Not {
        inner: Box<Cond>,
    },
    And {
        left: Box<Cond>,
        right: Box<Cond>,
    },
    Or {
        left: Box<Cond>,
        right: Box<Cond>,
    },
    Xor {
        left: Box<Cond>,
        right: Box<Cond>,
    },
    Paren {
        inner: Box<Cond>,
    },
}

/// Helper function for serde to skip serializing default spans
fn is_default_span(span: &Span) -> bool {
    *span == Span::default()
}
