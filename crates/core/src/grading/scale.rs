//! The grading scale.
//!
//! Letter grades and GPA points share one ordered table so the bucket
//! boundaries cannot drift apart: a given percentage always maps to a
//! letter and a GPA value expressing the same tier.

use rust_decimal::Decimal;

use super::error::GradingError;
use super::types::LetterGrade;

/// One row of the grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeBand {
    /// Inclusive lower bound of the band, in whole percent.
    pub floor: u32,
    /// Letter grade for the band.
    pub letter: LetterGrade,
    /// GPA points for the band, stored in tenths (37 = 3.7) so the table
    /// stays `const`.
    pub points_tenths: i64,
}

impl GradeBand {
    /// GPA points on the 4.0 scale.
    #[must_use]
    pub fn points(&self) -> Decimal {
        Decimal::new(self.points_tenths, 1)
    }
}

/// Ordered highest-floor first; lookup takes the first band whose floor
/// the percentage meets.
pub const GRADING_SCALE: [GradeBand; 7] = [
    GradeBand { floor: 90, letter: LetterGrade::APlus, points_tenths: 40 },
    GradeBand { floor: 85, letter: LetterGrade::A, points_tenths: 37 },
    GradeBand { floor: 80, letter: LetterGrade::BPlus, points_tenths: 33 },
    GradeBand { floor: 75, letter: LetterGrade::B, points_tenths: 30 },
    GradeBand { floor: 70, letter: LetterGrade::CPlus, points_tenths: 27 },
    GradeBand { floor: 65, letter: LetterGrade::C, points_tenths: 23 },
    GradeBand { floor: 60, letter: LetterGrade::D, points_tenths: 20 },
];

/// Fall-through band for anything below the lowest floor.
const FAILING: GradeBand = GradeBand {
    floor: 0,
    letter: LetterGrade::F,
    points_tenths: 0,
};

/// Subjects at or above this percentage count as passed.
///
/// This coincides with the D cutoff today but is an independent policy
/// constant; changing the scale does not move it and vice versa.
pub const PASS_MARK_PERCENT: u32 = 60;

/// Returns the scale band a percentage falls into.
#[must_use]
pub fn band_for(percentage: Decimal) -> &'static GradeBand {
    GRADING_SCALE
        .iter()
        .find(|band| percentage >= Decimal::from(band.floor))
        .unwrap_or(&FAILING)
}

/// Classifies a percentage as a letter grade.
#[must_use]
pub fn letter_grade(percentage: Decimal) -> LetterGrade {
    band_for(percentage).letter
}

/// Maps a percentage to GPA points on the 4.0 scale.
#[must_use]
pub fn gpa_points(percentage: Decimal) -> Decimal {
    band_for(percentage).points()
}

/// Returns `true` if the percentage meets the pass mark.
#[must_use]
pub fn is_passing(percentage: Decimal) -> bool {
    percentage >= Decimal::from(PASS_MARK_PERCENT)
}

/// Computes the percentage for a (marks obtained, total marks) pair.
///
/// # Errors
///
/// Returns `GradingError::InvalidTotalMarks` if `total <= 0`. The record
/// invariant already guarantees a positive total, but the guard keeps a
/// bypassed invariant from turning into a division by zero.
pub fn percentage(obtained: Decimal, total: Decimal) -> Result<Decimal, GradingError> {
    if total <= Decimal::ZERO {
        return Err(GradingError::InvalidTotalMarks(total));
    }
    Ok(obtained / total * Decimal::ONE_HUNDRED)
}
