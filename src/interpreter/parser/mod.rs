//! PEST-based parser for the Enquanto language
//!
//! Produces the AST consumed by the executor, with span information on every
//! statement for diagnostics. Syntax errors are collected as line-level
//! records so a driver can report them the same way whatever their cause.

use std::num::NonZeroU32;

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;
use tracing::debug;

use super::types::{BinaryOp, Case, Cond, Expr, Program, RelOp, Span, Stmt};

pub mod semantic_validator;


/* ===================== PEST Parser ===================== */

#[derive(Parser)]
#[grammar = "interpreter/parser/enquanto.pest"]
struct EnquantoParser;

type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/* ===================== Options ===================== */

/// Knobs that change how the source is translated into the AST
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Build `ou` and `xor` as And nodes, reproducing the historical wiring
    pub legacy_logic_wiring: bool,
}

/* ===================== Error Types ===================== */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unexpected input{}", expected_list(.expected))]
    Unexpected { expected: Vec<String> },

    #[error("integer literal does not fit in 32 bits")]
    IntegerOutOfRange,

    #[error("break level must be a positive 32-bit integer")]
    InvalidBreakLevel,

    #[error("parser produced an unexpected '{rule}' node")]
    Internal { rule: String },
}

/// One syntax error, located by 1-based line and column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}:{column}: {kind} (at '{token}')")]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    /// Offending source text, or `<EOF>`
    pub token: String,
    pub kind: SyntaxErrorKind,
}

/// Parsing failed; `errors` is never empty and is in source order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_errors(.errors))]
pub struct ParseError {
    pub errors: Vec<SyntaxError>,
}

fn expected_list(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(", expected {}", expected.join(" or "))
    }
}

fn format_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl ParseError {
    fn single(error: SyntaxError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    fn from_pest(err: pest::error::Error<Rule>, source: &str) -> Self {
        let offset = match err.location {
            pest::error::InputLocation::Pos(pos) => pos,
            pest::error::InputLocation::Span((start, _)) => start,
        };
        let kind = match &err.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                SyntaxErrorKind::Unexpected {
                    expected: positives.iter().map(describe_rule).collect(),
                }
            }
            pest::error::ErrorVariant::CustomError { message } => SyntaxErrorKind::Unexpected {
                expected: vec![message.clone()],
            },
        };
        Self::single(syntax_error_at(source, offset, kind))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Build a [`SyntaxError`] for the token starting at (or after) `offset`
fn syntax_error_at(source: &str, offset: usize, kind: SyntaxErrorKind) -> SyntaxError {
    let offset = offset.min(source.len());
    let rest = &source[offset..];
    let skipped = rest.len() - rest.trim_start().len();
    let offset = offset + skipped;
    let (line, col) = offset_to_line_col(source, offset);

    SyntaxError {
        line: line + 1,
        column: col + 1,
        token: token_at(&source[offset..]),
        kind,
    }
}

/// The lexeme at the start of `rest`: a word, a number, or one character
fn token_at(rest: &str) -> String {
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return "<EOF>".to_string();
    };
    if first.is_ascii_alphanumeric() || first == '_' || first == '-' {
        let len = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
            .map_or(rest.len(), |(i, _)| i);
        rest[..len].to_string()
    } else {
        first.to_string()
    }
}

fn describe_rule(rule: &Rule) -> String {
    let name = format!("{:?}", rule);
    match name.strip_prefix("kw_") {
        Some(word) => format!("'{}'", word),
        None => name.trim_end_matches("_stmt").replace('_', " "),
    }
}

/* ===================== Span Helpers ===================== */

/// Convert a PEST pair's span to our Span type
fn pair_to_span(pair: &Pair, source: &str) -> Span {
    let pest_span = pair.as_span();
    let start = pest_span.start();
    let end = pest_span.end();

    let (start_line, start_col) = offset_to_line_col(source, start);
    let (end_line, end_col) = offset_to_line_col(source, end);

    Span::new(start, end, start_line, start_col, end_line, end_col)
}

/// Convert byte offset to (line, column) - 0-indexed
fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    let mut current_offset = 0;

    for ch in source.chars() {
        if current_offset >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
        current_offset += ch.len_utf8();
    }

    (line, col)
}

/* ===================== Public API ===================== */

/// Parse an Enquanto source string with default options
pub fn parse_program(source: &str) -> ParseResult<Program> {
    parse_program_with(source, &ParseOptions::default())
}

/// Parse an Enquanto source string into a [`Program`]
pub fn parse_program_with(source: &str, options: &ParseOptions) -> ParseResult<Program> {
    let mut pairs = EnquantoParser::parse(Rule::program, source)
        .map_err(|err| ParseError::from_pest(err, source))?;

    let mut builder = Builder {
        source,
        options: *options,
        errors: Vec::new(),
    };

    let program_pair = match pairs.next() {
        Some(pair) => pair,
        None => return Err(builder.internal(source.len(), "program")),
    };
    let program = builder.build_program(program_pair)?;

    if !builder.errors.is_empty() {
        return Err(ParseError {
            errors: builder.errors,
        });
    }

    debug!(
        statements = program.body.len(),
        legacy_logic_wiring = options.legacy_logic_wiring,
        "parsed program"
    );
    Ok(program)
}

/* ===================== AST Builder ===================== */

/// Walks the pest pairs, producing AST nodes
///
/// Literal range problems are recorded in `errors` and building continues,
/// so one parse reports every bad literal. Structural surprises abort.
struct Builder<'s> {
    source: &'s str,
    options: ParseOptions,
    errors: Vec<SyntaxError>,
}

fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_skip
            | Rule::kw_se
            | Rule::kw_entao
            | Rule::kw_senaose
            | Rule::kw_senao
            | Rule::kw_enquanto
            | Rule::kw_faca
            | Rule::kw_para
            | Rule::kw_de
            | Rule::kw_ate
            | Rule::kw_passo
            | Rule::kw_escolha
            | Rule::kw_caso
            | Rule::kw_outro
            | Rule::kw_exiba
            | Rule::kw_escreva
            | Rule::kw_quebrar
            | Rule::kw_leia
    )
}

/// Children of `pair` that carry meaning (reserved words dropped)
fn children<'i>(pair: Pair<'i>) -> impl Iterator<Item = Pair<'i>> {
    pair.into_inner().filter(|p| !is_keyword(p.as_rule()))
}

impl<'s> Builder<'s> {
    fn internal(&self, offset: usize, rule: &str) -> ParseError {
        ParseError::single(syntax_error_at(
            self.source,
            offset,
            SyntaxErrorKind::Internal {
                rule: rule.to_string(),
            },
        ))
    }

    fn unexpected(&self, pair: &Pair) -> ParseError {
        self.internal(pair.as_span().start(), &format!("{:?}", pair.as_rule()))
    }

    /// Next child of `parent`, or an internal error naming what was missing
    fn expect<'i>(
        &self,
        pairs: &mut impl Iterator<Item = Pair<'i>>,
        parent: &Span,
        what: &str,
    ) -> ParseResult<Pair<'i>> {
        pairs
            .next()
            .ok_or_else(|| self.internal(parent.end, what))
    }

    fn record(&mut self, pair: &Pair, kind: SyntaxErrorKind) {
        let error = syntax_error_at(self.source, pair.as_span().start(), kind);
        self.errors.push(error);
    }

    fn span(&self, pair: &Pair) -> Span {
        pair_to_span(pair, self.source)
    }

    fn build_program(&mut self, pair: Pair) -> ParseResult<Program> {
        let span = self.span(&pair);
        let mut body = Vec::new();

        for child in children(pair) {
            match child.as_rule() {
                Rule::sequence => body = self.build_sequence(child)?,
                Rule::EOI => {}
                _ => return Err(self.unexpected(&child)),
            }
        }

        Ok(Program { body, span })
    }

    fn build_sequence(&mut self, pair: Pair) -> ParseResult<Vec<Stmt>> {
        children(pair)
            .map(|stmt_pair| self.build_statement(stmt_pair))
            .collect()
    }

    /* ===================== Statements ===================== */

    fn build_statement(&mut self, pair: Pair) -> ParseResult<Stmt> {
        let span = self.span(&pair);

        match pair.as_rule() {
            Rule::assign_stmt => {
                let mut inner = children(pair);
                let name = self.expect(&mut inner, &span, "identifier")?;
                let expr = self.expect(&mut inner, &span, "expr")?;
                Ok(Stmt::Assign {
                    name: name.as_str().to_string(),
                    expr: self.build_expr(expr)?,
                    span,
                })
            }
            Rule::skip_stmt => Ok(Stmt::Skip { span }),
            Rule::if_stmt => self.build_if_stmt(pair, span),
            Rule::while_stmt => {
                let mut inner = children(pair);
                let test = self.expect(&mut inner, &span, "condition")?;
                let body = self.expect(&mut inner, &span, "statement")?;
                Ok(Stmt::While {
                    test: self.build_cond(test)?,
                    body: Box::new(self.build_statement(body)?),
                    span,
                })
            }
            Rule::for_stmt => self.build_for_stmt(pair, span),
            Rule::switch_stmt => self.build_switch_stmt(pair, span),
            Rule::print_text_stmt => {
                let mut inner = children(pair);
                let text = self.expect(&mut inner, &span, "text")?.as_str();
                // Delimiters are single-byte quotes
                let text = text
                    .get(1..text.len().saturating_sub(1))
                    .unwrap_or_default()
                    .to_string();
                Ok(Stmt::PrintText { text, span })
            }
            Rule::print_value_stmt => {
                let mut inner = children(pair);
                let expr = self.expect(&mut inner, &span, "expr")?;
                Ok(Stmt::PrintValue {
                    expr: self.build_expr(expr)?,
                    span,
                })
            }
            Rule::break_stmt => {
                let level = match children(pair).next() {
                    Some(level_pair) => {
                        match level_pair.as_str().parse::<u32>().ok().and_then(NonZeroU32::new) {
                            Some(level) => level,
                            None => {
                                self.record(&level_pair, SyntaxErrorKind::InvalidBreakLevel);
                                NonZeroU32::MIN
                            }
                        }
                    }
                    None => NonZeroU32::MIN,
                };
                Ok(Stmt::Break { level, span })
            }
            Rule::block => {
                let mut body = Vec::new();
                for child in children(pair) {
                    body.extend(self.build_sequence(child)?);
                }
                Ok(Stmt::Block { body, span })
            }
            _ => Err(self.unexpected(&pair)),
        }
    }

    /// `se c entao S (senaose c entao S)* senao S`
    ///
    /// Each `senaose` arm becomes an If nested in the else branch of the
    /// previous one, so the chain is tested in source order.
    fn build_if_stmt(&mut self, pair: Pair, span: Span) -> ParseResult<Stmt> {
        let mut inner = children(pair);
        let test = self.expect(&mut inner, &span, "condition")?;
        let then_pair = self.expect(&mut inner, &span, "statement")?;

        let test = self.build_cond(test)?;
        let then_s = self.build_statement(then_pair)?;

        let mut arms = Vec::new();
        let mut else_s = None;
        for child in inner {
            match child.as_rule() {
                Rule::else_if => {
                    let arm_span = self.span(&child);
                    let mut arm = children(child);
                    let arm_test = self.expect(&mut arm, &arm_span, "condition")?;
                    let arm_body = self.expect(&mut arm, &arm_span, "statement")?;
                    arms.push((self.build_cond(arm_test)?, self.build_statement(arm_body)?, arm_span));
                }
                _ => else_s = Some(self.build_statement(child)?),
            }
        }

        let else_s = match else_s {
            Some(stmt) => stmt,
            None => return Err(self.internal(span.end, "else branch")),
        };

        let else_s = arms
            .into_iter()
            .rev()
            .fold(else_s, |acc, (arm_test, arm_body, arm_span)| Stmt::If {
                test: arm_test,
                then_s: Box::new(arm_body),
                else_s: Box::new(acc),
                span: arm_span,
            });

        Ok(Stmt::If {
            test,
            then_s: Box::new(then_s),
            else_s: Box::new(else_s),
            span,
        })
    }

    fn build_for_stmt(&mut self, pair: Pair, span: Span) -> ParseResult<Stmt> {
        let mut inner = children(pair);
        let var = self.expect(&mut inner, &span, "identifier")?;
        let start = self.expect(&mut inner, &span, "expr")?;
        let end = self.expect(&mut inner, &span, "expr")?;

        let var = var.as_str().to_string();
        let start = self.build_expr(start)?;
        let end = self.build_expr(end)?;

        let mut next = self.expect(&mut inner, &span, "statement")?;
        let step = if next.as_rule() == Rule::for_step {
            let step_span = self.span(&next);
            let step_expr = self.expect(&mut children(next), &step_span, "expr")?;
            next = self.expect(&mut inner, &span, "statement")?;
            Some(self.build_expr(step_expr)?)
        } else {
            None
        };
        let body = self.build_statement(next)?;

        Ok(Stmt::For {
            var,
            start,
            end,
            step,
            body: Box::new(body),
            span,
        })
    }

    fn build_switch_stmt(&mut self, pair: Pair, span: Span) -> ParseResult<Stmt> {
        let mut inner = children(pair);
        let selector = self.expect(&mut inner, &span, "expr")?;
        let selector = self.build_expr(selector)?;

        let mut cases = Vec::new();
        let mut default = None;
        for arm in inner {
            let arm_span = self.span(&arm);
            match arm.as_rule() {
                Rule::case_arm => {
                    let mut parts = children(arm);
                    let value = self.expect(&mut parts, &arm_span, "expr")?;
                    let body = self.expect(&mut parts, &arm_span, "statement")?;
                    cases.push(Case {
                        value: self.build_expr(value)?,
                        body: self.build_statement(body)?,
                    });
                }
                Rule::default_arm => {
                    let body = self.expect(&mut children(arm), &arm_span, "statement")?;
                    default = Some(Box::new(self.build_statement(body)?));
                }
                _ => return Err(self.unexpected(&arm)),
            }
        }

        Ok(Stmt::Switch {
            selector,
            cases,
            default,
            span,
        })
    }

    /* ===================== Expressions ===================== */

    fn build_expr(&mut self, pair: Pair) -> ParseResult<Expr> {
        match pair.as_rule() {
            Rule::expr | Rule::term => self.build_binary_expr(pair),
            Rule::power => {
                let span = self.span(&pair);
                let mut inner = children(pair);
                let base = self.expect(&mut inner, &span, "operand")?;
                let base = self.build_expr(base)?;
                match inner.next() {
                    Some(_op) => {
                        let exponent = self.expect(&mut inner, &span, "operand")?;
                        Ok(Expr::Binary {
                            op: BinaryOp::Pow,
                            left: Box::new(base),
                            right: Box::new(self.build_expr(exponent)?),
                        })
                    }
                    None => Ok(base),
                }
            }
            Rule::integer => {
                let v = match pair.as_str().parse::<i32>() {
                    Ok(v) => v,
                    Err(_) => {
                        self.record(&pair, SyntaxErrorKind::IntegerOutOfRange);
                        0
                    }
                };
                Ok(Expr::Int { v })
            }
            Rule::identifier => Ok(Expr::Var {
                name: pair.as_str().to_string(),
                span: self.span(&pair),
            }),
            Rule::read_input => Ok(Expr::Read {
                span: self.span(&pair),
            }),
            _ => Err(self.unexpected(&pair)),
        }
    }

    /// Fold `operand (op operand)*` into a left-associative tree
    fn build_binary_expr(&mut self, pair: Pair) -> ParseResult<Expr> {
        let span = self.span(&pair);
        let mut inner = children(pair);
        let first = self.expect(&mut inner, &span, "operand")?;
        let mut left = self.build_expr(first)?;

        while let Some(op_pair) = inner.next() {
            let op = match op_pair.as_rule() {
                Rule::op_add => BinaryOp::Add,
                Rule::op_sub => BinaryOp::Sub,
                Rule::op_mul => BinaryOp::Mul,
                Rule::op_div => BinaryOp::Div,
                _ => return Err(self.unexpected(&op_pair)),
            };
            let right = self.expect(&mut inner, &span, "operand")?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(self.build_expr(right)?),
            };
        }

        Ok(left)
    }

    /* ===================== Conditions ===================== */

    fn build_cond(&mut self, pair: Pair) -> ParseResult<Cond> {
        let span = self.span(&pair);

        match pair.as_rule() {
            Rule::condition => {
                let inner = self.expect(&mut children(pair), &span, "condition")?;
                self.build_cond(inner)
            }
            Rule::or_cond | Rule::xor_cond | Rule::and_cond => self.build_logic_chain(pair),
            Rule::not_cond => {
                let mut inner = children(pair);
                let first = self.expect(&mut inner, &span, "condition")?;
                if first.as_rule() == Rule::op_not {
                    let operand = self.expect(&mut inner, &span, "condition")?;
                    Ok(Cond::Not {
                        inner: Box::new(self.build_cond(operand)?),
                    })
                } else {
                    self.build_cond(first)
                }
            }
            Rule::relation => {
                let mut inner = children(pair);
                let left = self.expect(&mut inner, &span, "expr")?;
                let op_pair = self.expect(&mut inner, &span, "relational operator")?;
                let right = self.expect(&mut inner, &span, "expr")?;
                let op = match op_pair.as_rule() {
                    Rule::op_eq => RelOp::Eq,
                    Rule::op_le => RelOp::Le,
                    Rule::op_ge => RelOp::Ge,
                    Rule::op_ne => RelOp::Ne,
                    _ => return Err(self.unexpected(&op_pair)),
                };
                Ok(Cond::Rel {
                    op,
                    left: self.build_expr(left)?,
                    right: self.build_expr(right)?,
                })
            }
            Rule::boolean => Ok(Cond::Bool {
                v: pair.as_str().starts_with("verdadeiro"),
            }),
            Rule::paren_cond => {
                let inner = self.expect(&mut children(pair), &span, "condition")?;
                Ok(Cond::Paren {
                    inner: Box::new(self.build_cond(inner)?),
                })
            }
            _ => Err(self.unexpected(&pair)),
        }
    }

    /// Fold `cond (op cond)*` into a left-associative tree
    ///
    /// With `legacy_logic_wiring`, `ou` and `xor` both produce And.
    fn build_logic_chain(&mut self, pair: Pair) -> ParseResult<Cond> {
        let span = self.span(&pair);
        let legacy = self.options.legacy_logic_wiring;
        let mut inner = children(pair);
        let first = self.expect(&mut inner, &span, "condition")?;
        let mut left = self.build_cond(first)?;

        while let Some(op_pair) = inner.next() {
            let right = self.expect(&mut inner, &span, "condition")?;
            let left_box = Box::new(left);
            let right_box = Box::new(self.build_cond(right)?);
            left = match op_pair.as_rule() {
                Rule::op_and => Cond::And {
                    left: left_box,
                    right: right_box,
                },
                Rule::op_or | Rule::op_xor if legacy => Cond::And {
                    left: left_box,
                    right: right_box,
                },
                Rule::op_or => Cond::Or {
                    left: left_box,
                    right: right_box,
                },
                Rule::op_xor => Cond::Xor {
                    left: left_box,
                    right: right_box,
                },
                _ => return Err(self.unexpected(&op_pair)),
            };
        }

        Ok(left)
    }
}
