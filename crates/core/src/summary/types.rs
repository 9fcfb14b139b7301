//! Summary data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use acadia_shared::types::{SubjectId, UserId};

use crate::grading::LetterGrade;

/// The slice of a published grade record the aggregator needs.
#[derive(Debug, Clone, Copy)]
pub struct PublishedGrade {
    /// Subject the assessment belongs to.
    pub subject_id: SubjectId,
    /// Stored percentage (not recomputed at aggregation time).
    pub percentage: Decimal,
}

/// Summary over one student's published grades for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSummary {
    /// Count of distinct subjects with at least one published grade.
    pub total_subjects: usize,
    /// Mean of the stored percentages, rounded to 2 decimal places.
    pub average_percentage: Decimal,
    /// Scale applied to the unrounded mean.
    pub overall_grade: LetterGrade,
}

/// The slice of a published report card the aggregator needs.
#[derive(Debug, Clone, Copy)]
pub struct ReportCardFigures {
    /// Stored percentage.
    pub percentage: Decimal,
    /// Stored GPA points.
    pub grade_points: Decimal,
    /// Stored attendance percentage.
    pub attendance_percentage: Decimal,
}

/// Summary over one student's published report cards for a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCardSummary {
    /// Count of subject report cards in the period.
    pub total_subjects: usize,
    /// Mean percentage, rounded to 2 decimal places.
    pub overall_percentage: Decimal,
    /// Scale applied to the unrounded mean percentage.
    pub overall_grade: LetterGrade,
    /// Mean GPA points, rounded to 2 decimal places.
    pub overall_gpa: Decimal,
    /// Mean attendance percentage, rounded to 2 decimal places.
    pub overall_attendance: Decimal,
    /// Subjects at or above the pass mark.
    pub subjects_passed: usize,
    /// Subjects below the pass mark.
    pub subjects_failed: usize,
}

/// One published report card row of a cohort, tagged with its student.
#[derive(Debug, Clone, Copy)]
pub struct CohortGradeRow {
    /// Student the report card belongs to.
    pub student_id: UserId,
    /// Stored percentage.
    pub percentage: Decimal,
}

/// Per-student line of a class summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentStanding {
    /// Student identity.
    pub student_id: UserId,
    /// Mean of the student's stored percentages, rounded to 2 decimals.
    pub average_percentage: Decimal,
    /// Number of report cards behind the mean.
    pub total_subjects: usize,
}

/// Cohort-level summary built from per-student means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Students with at least one matching published report card.
    pub total_students: usize,
    /// Mean over per-student means, rounded to 2 decimal places.
    pub average_percentage: Decimal,
    /// Highest per-student mean, rounded to 2 decimal places.
    pub highest_percentage: Decimal,
    /// Lowest per-student mean, rounded to 2 decimal places.
    pub lowest_percentage: Decimal,
    /// Per-student standings in first-seen order.
    pub students: Vec<StudentStanding>,
}
