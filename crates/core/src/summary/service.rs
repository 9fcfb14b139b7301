//! Aggregation over published records.
//!
//! All inputs are stored values fetched by the caller; nothing here is
//! recomputed from raw marks. Means are taken unrounded, classified
//! through the grading scale, and only then rounded for display.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::grading::scale;

use super::error::SummaryError;
use super::types::{
    ClassSummary, CohortGradeRow, GradeSummary, PublishedGrade, ReportCardFigures,
    ReportCardSummary, StudentStanding,
};

/// Stateless aggregation service.
pub struct SummaryService;

impl SummaryService {
    /// Summarizes one student's published grades for a period.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NoRecords` when the set is empty - the
    /// caller must surface "no data", never an all-zero summary.
    pub fn summarize_grades(grades: &[PublishedGrade]) -> Result<GradeSummary, SummaryError> {
        if grades.is_empty() {
            return Err(SummaryError::NoRecords);
        }

        let distinct_subjects: HashSet<_> = grades.iter().map(|g| g.subject_id).collect();
        let average = mean(grades.iter().map(|g| g.percentage));

        Ok(GradeSummary {
            total_subjects: distinct_subjects.len(),
            average_percentage: average.round_dp(2),
            overall_grade: scale::letter_grade(average),
        })
    }

    /// Summarizes one student's published report cards for a period.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NoRecords` when the set is empty.
    pub fn summarize_report_cards(
        cards: &[ReportCardFigures],
    ) -> Result<ReportCardSummary, SummaryError> {
        if cards.is_empty() {
            return Err(SummaryError::NoRecords);
        }

        let overall_percentage = mean(cards.iter().map(|c| c.percentage));
        let overall_gpa = mean(cards.iter().map(|c| c.grade_points));
        let overall_attendance = mean(cards.iter().map(|c| c.attendance_percentage));

        let subjects_passed = cards
            .iter()
            .filter(|c| scale::is_passing(c.percentage))
            .count();

        Ok(ReportCardSummary {
            total_subjects: cards.len(),
            overall_percentage: overall_percentage.round_dp(2),
            overall_grade: scale::letter_grade(overall_percentage),
            overall_gpa: overall_gpa.round_dp(2),
            overall_attendance: overall_attendance.round_dp(2),
            subjects_passed,
            subjects_failed: cards.len() - subjects_passed,
        })
    }

    /// Summarizes a cohort from its published report card rows.
    ///
    /// Averaging is two-level: each student's mean is taken first, and the
    /// cohort statistics run over those per-student means. A student with
    /// many subjects therefore carries the same weight as a student with
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NoRecords` when no student in the cohort has
    /// a matching row.
    pub fn summarize_cohort(rows: &[CohortGradeRow]) -> Result<ClassSummary, SummaryError> {
        if rows.is_empty() {
            return Err(SummaryError::NoRecords);
        }

        // Group by student, preserving first-seen order.
        let mut order = Vec::new();
        let mut grouped: HashMap<_, Vec<Decimal>> = HashMap::new();
        for row in rows {
            let slot = grouped.entry(row.student_id).or_default();
            if slot.is_empty() {
                order.push(row.student_id);
            }
            slot.push(row.percentage);
        }

        let students: Vec<StudentStanding> = order
            .into_iter()
            .map(|student_id| {
                let percentages = &grouped[&student_id];
                StudentStanding {
                    student_id,
                    average_percentage: mean(percentages.iter().copied()).round_dp(2),
                    total_subjects: percentages.len(),
                }
            })
            .collect();

        let per_student_means: Vec<Decimal> = grouped
            .values()
            .map(|percentages| mean(percentages.iter().copied()))
            .collect();

        let highest = per_student_means.iter().copied().max().unwrap_or_default();
        let lowest = per_student_means.iter().copied().min().unwrap_or_default();
        let average = mean(per_student_means.iter().copied());

        Ok(ClassSummary {
            total_students: students.len(),
            average_percentage: average.round_dp(2),
            highest_percentage: highest.round_dp(2),
            lowest_percentage: lowest.round_dp(2),
            students,
        })
    }
}

/// Arithmetic mean of a non-empty iterator.
fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut count: i64 = 0;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        return Decimal::ZERO;
    }
    sum / Decimal::from(count)
}
