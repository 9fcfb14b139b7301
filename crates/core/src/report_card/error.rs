//! Report card error types.

use thiserror::Error;

use crate::grading::GradingError;

/// Errors raised while validating or deriving report card fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportCardError {
    /// The marks invariants are shared with per-assessment grades.
    #[error(transparent)]
    Marks(#[from] GradingError),

    /// Classes attended cannot exceed total classes.
    #[error("classes attended {attended} exceed total classes {total}")]
    AttendanceExceedsTotal {
        /// Classes attended.
        attended: u32,
        /// Total classes held.
        total: u32,
    },
}
