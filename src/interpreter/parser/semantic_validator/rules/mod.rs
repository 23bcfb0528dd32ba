//! Validation Rules
//!
//! Each file in this module contains one validation rule:
//!
//! - `break_depth.rs` - `quebrar` levels deeper than the enclosing loops
//! - `zero_step.rs` - For loops whose step is the literal 0
//! - `unassigned_variable.rs` - Variables read but never written

mod break_depth;
mod unassigned_variable;
mod zero_step;

pub use break_depth::BreakDepthRule;
pub use unassigned_variable::UnassignedVariableRule;
pub use zero_step::ZeroStepRule;
