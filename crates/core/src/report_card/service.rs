//! Report card derivation.
//!
//! A report card carries two independent groups of derived fields: the
//! marks group (percentage, letter grade, GPA points) and the attendance
//! percentage. Each group is recomputed only when one of its own base
//! fields changes.

use rust_decimal::Decimal;

use crate::grading::{GradingService, MarksPatch, scale};

use super::error::ReportCardError;
use super::types::{AttendancePatch, ReportDerivation};

/// Stateless service for report card derivation.
pub struct ReportCardService;

impl ReportCardService {
    /// Computes the marks group for a new report card.
    ///
    /// # Errors
    ///
    /// Returns an error if the marks violate a record invariant.
    pub fn derive_marks(
        obtained: Decimal,
        possible: Decimal,
    ) -> Result<ReportDerivation, ReportCardError> {
        let marks = GradingService::derive(obtained, possible)?;
        Ok(ReportDerivation {
            percentage: marks.percentage,
            letter_grade: marks.letter_grade,
            grade_points: scale::gpa_points(marks.percentage),
        })
    }

    /// Applies the recomputation policy for the marks group of an update.
    ///
    /// Returns `Ok(None)` when the patch touches neither marks field.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective pair violates a record invariant.
    pub fn rederive_marks(
        current_obtained: Decimal,
        current_possible: Decimal,
        patch: MarksPatch,
    ) -> Result<Option<ReportDerivation>, ReportCardError> {
        if patch.is_empty() {
            return Ok(None);
        }

        let obtained = patch.marks_obtained.resolve(current_obtained);
        let possible = patch.total_marks.resolve(current_possible);
        Self::derive_marks(obtained, possible).map(Some)
    }

    /// Computes the attendance percentage.
    ///
    /// `total == 0` yields zero rather than an error: a report card may be
    /// drafted before any class has been held.
    ///
    /// # Errors
    ///
    /// Returns an error if `attended > total`.
    pub fn attendance_percentage(attended: u32, total: u32) -> Result<Decimal, ReportCardError> {
        if attended > total {
            return Err(ReportCardError::AttendanceExceedsTotal { attended, total });
        }
        if total == 0 {
            return Ok(Decimal::ZERO);
        }
        Ok(Decimal::from(attended) / Decimal::from(total) * Decimal::ONE_HUNDRED)
    }

    /// Applies the recomputation policy for the attendance group of an
    /// update.
    ///
    /// Returns `Ok(None)` when the patch touches neither attendance field.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective counts violate the invariant.
    pub fn rederive_attendance(
        current_attended: u32,
        current_total: u32,
        patch: AttendancePatch,
    ) -> Result<Option<Decimal>, ReportCardError> {
        if patch.is_empty() {
            return Ok(None);
        }

        let attended = patch.classes_attended.resolve(current_attended);
        let total = patch.total_classes.resolve(current_total);
        Self::attendance_percentage(attended, total).map(Some)
    }
}
