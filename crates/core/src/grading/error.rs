//! Grading error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating or deriving marks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// Total marks must be strictly positive.
    #[error("total marks must be greater than zero, got {0}")]
    InvalidTotalMarks(Decimal),

    /// Marks obtained cannot be negative.
    #[error("marks obtained cannot be negative, got {0}")]
    NegativeMarks(Decimal),

    /// Marks obtained cannot exceed total marks.
    #[error("marks obtained {obtained} exceed total marks {total}")]
    MarksExceedTotal {
        /// Marks obtained.
        obtained: Decimal,
        /// Total marks.
        total: Decimal,
    },
}
