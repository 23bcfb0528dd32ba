//! Control flow signal types

use std::num::NonZeroU32;

/* ===================== Control Flow ===================== */

/// Outcome of executing a statement
///
/// `Break` is not an ordinary completion: Blocks, If branches and Switch bodies
/// hand it to their caller untouched, and only loops intercept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Statement completed; continue with the next one
    Normal,
    /// Unwinding; carries the number of loop levels still to leave
    Break(NonZeroU32),
}

impl Control {
    /// Signal left after a loop terminates because of `Break(level)`
    ///
    /// The loop consumes one level. If none remain the signal is absorbed and
    /// execution resumes after the loop.
    pub fn leave_loop(level: NonZeroU32) -> Control {
        NonZeroU32::new(level.get() - 1).map_or(Control::Normal, Control::Break)
    }
}
