//! Semantic validation for Enquanto programs
//!
//! A rule-based pass that runs after parsing and flags code the grammar
//! accepts but that is very likely wrong. The language defines a behavior for
//! everything that parses, so every built-in rule reports a warning or a hint;
//! none of them prevents execution.
//!
//! # Architecture
//!
//! 1. **ValidationRule trait** - Each rule implements this trait
//! 2. **Validator** - Collects and runs all rules
//! 3. **ValidationError** - The output of validation (warnings and hints)
//!
//! # Adding a New Rule
//!
//! 1. Create a new file in `semantic_validator/rules/`
//! 2. Implement `ValidationRule` for your struct
//! 3. Add it to the `Validator::new()` constructor

pub mod rules;

use std::fmt;

use super::super::types::{Program, Span};

// ============================================================================
// Validation Error Types
// ============================================================================

/// A diagnostic produced by semantic analysis
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The source location of the issue
    pub span: Span,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Which rule produced this error
    pub rule_id: &'static str,
}

/// Severity levels for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Should probably be fixed - potential bug
    Warning,
    /// Suggestion for improvement
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        };
        f.write_str(name)
    }
}

impl ValidationError {
    pub fn warning(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Warning,
            rule_id,
        }
    }

    pub fn hint(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Hint,
            rule_id,
        }
    }

    /// 1-based line of the diagnostic
    pub fn line(&self) -> usize {
        self.span.start_line + 1
    }

    /// 1-based column of the diagnostic
    pub fn column(&self) -> usize {
        self.span.start_col + 1
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, col {}: {} [{}]",
            self.severity,
            self.line(),
            self.column(),
            self.message,
            self.rule_id
        )
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait that all validation rules must implement
///
/// Each rule checks one aspect of the program and does not depend on the
/// results of other rules.
pub trait ValidationRule: Send + Sync {
    /// Unique identifier for this rule (e.g., "break-depth")
    fn id(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Run the validation and return any diagnostics found
    fn validate(&self, program: &Program, source: &str) -> Vec<ValidationError>;
}

// ============================================================================
// Validator - Runs All Rules
// ============================================================================

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(rules::BreakDepthRule),
                Box::new(rules::ZeroStepRule),
                Box::new(rules::UnassignedVariableRule),
            ],
        }
    }

    /// Run all validation rules, diagnostics sorted by source position
    pub fn validate(&self, program: &Program, source: &str) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(program, source))
            .collect();
        errors.sort_by_key(|e| e.span.start);
        errors
    }

    /// Registered rules as `(id, description)` pairs
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.iter().map(|r| (r.id(), r.description()))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Validate a program with every built-in rule
pub fn validate_program(program: &Program, source: &str) -> Vec<ValidationError> {
    Validator::new().validate(program, source)
}
