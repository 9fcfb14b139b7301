//! Report card data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use acadia_shared::types::Patch;

use crate::grading::LetterGrade;

/// Derived fields of the marks group: percentage, letter grade and GPA
/// points, always recomputed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDerivation {
    /// Percentage in 0..=100.
    pub percentage: Decimal,
    /// Letter grade classified from the percentage.
    pub letter_grade: LetterGrade,
    /// GPA points on the 4.0 scale.
    pub grade_points: Decimal,
}

/// The attendance portion of a report card update.
///
/// Independent of the marks group: touching attendance never recomputes
/// the marks derivation and vice versa.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttendancePatch {
    /// New classes-attended count, if supplied.
    pub classes_attended: Patch<u32>,
    /// New total-classes count, if supplied.
    pub total_classes: Patch<u32>,
}

impl AttendancePatch {
    /// Returns `true` if the patch touches neither attendance field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.classes_attended.is_set() && !self.total_classes.is_set()
    }
}
