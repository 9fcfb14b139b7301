//! Mark validation and derived-field recomputation policy.

use rust_decimal::Decimal;

use super::error::GradingError;
use super::scale;
use super::types::{MarkDerivation, MarksPatch};

/// Stateless service for grade derivation.
pub struct GradingService;

impl GradingService {
    /// Validates a (marks obtained, total marks) pair against the record
    /// invariants: `total > 0`, `obtained >= 0`, `obtained <= total`.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate_marks(obtained: Decimal, total: Decimal) -> Result<(), GradingError> {
        if total <= Decimal::ZERO {
            return Err(GradingError::InvalidTotalMarks(total));
        }
        if obtained < Decimal::ZERO {
            return Err(GradingError::NegativeMarks(obtained));
        }
        if obtained > total {
            return Err(GradingError::MarksExceedTotal { obtained, total });
        }
        Ok(())
    }

    /// Computes the derived fields for a new grade record.
    ///
    /// # Errors
    ///
    /// Returns an error if the marks violate a record invariant.
    pub fn derive(obtained: Decimal, total: Decimal) -> Result<MarkDerivation, GradingError> {
        Self::validate_marks(obtained, total)?;
        let percentage = scale::percentage(obtained, total)?;
        Ok(MarkDerivation {
            percentage,
            letter_grade: scale::letter_grade(percentage),
        })
    }

    /// Applies the recomputation policy for an update.
    ///
    /// Returns `Ok(None)` when the patch touches neither marks field - the
    /// stored derived fields stay untouched. Otherwise the effective pair
    /// (patched value where supplied, stored value where not) is validated
    /// and re-derived.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective pair violates a record invariant.
    pub fn rederive(
        current_obtained: Decimal,
        current_total: Decimal,
        patch: MarksPatch,
    ) -> Result<Option<MarkDerivation>, GradingError> {
        if patch.is_empty() {
            return Ok(None);
        }

        let obtained = patch.marks_obtained.resolve(current_obtained);
        let total = patch.total_marks.resolve(current_total);
        Self::derive(obtained, total).map(Some)
    }
}
