//! Tests for student and cohort aggregation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use acadia_shared::types::{SubjectId, UserId};

use crate::grading::LetterGrade;

use super::error::SummaryError;
use super::service::SummaryService;
use super::types::{CohortGradeRow, PublishedGrade, ReportCardFigures};

fn grade(subject_id: SubjectId, percentage: Decimal) -> PublishedGrade {
    PublishedGrade {
        subject_id,
        percentage,
    }
}

fn card(percentage: Decimal, grade_points: Decimal, attendance: Decimal) -> ReportCardFigures {
    ReportCardFigures {
        percentage,
        grade_points,
        attendance_percentage: attendance,
    }
}

#[test]
fn test_empty_grade_set_is_no_records_not_zeros() {
    assert_eq!(
        SummaryService::summarize_grades(&[]),
        Err(SummaryError::NoRecords)
    );
}

#[test]
fn test_grade_summary_mean_and_overall_grade() {
    let s1 = SubjectId::new();
    let s2 = SubjectId::new();
    let s3 = SubjectId::new();
    let summary = SummaryService::summarize_grades(&[
        grade(s1, dec!(90)),
        grade(s2, dec!(80)),
        grade(s3, dec!(70)),
    ])
    .unwrap();

    assert_eq!(summary.total_subjects, 3);
    assert_eq!(summary.average_percentage, dec!(80.00));
    assert_eq!(summary.overall_grade, LetterGrade::BPlus);
}

#[test]
fn test_grade_summary_counts_distinct_subjects() {
    let s1 = SubjectId::new();
    let s2 = SubjectId::new();
    let summary = SummaryService::summarize_grades(&[
        grade(s1, dec!(88)),
        grade(s1, dec!(92)),
        grade(s2, dec!(75)),
    ])
    .unwrap();

    // Three records, two subjects.
    assert_eq!(summary.total_subjects, 2);
}

#[test]
fn test_overall_grade_classifies_the_unrounded_mean() {
    // Mean of 89.99 and 90.02 is 90.005: A+ territory even though the
    // displayed 2dp rounding lands on 90.01 either way. Use values where
    // rounding first would change the band: 89.999 and 89.999 -> mean
    // 89.999 displays as 90.00 but classifies as A.
    let s1 = SubjectId::new();
    let s2 = SubjectId::new();
    let summary = SummaryService::summarize_grades(&[
        grade(s1, dec!(89.999)),
        grade(s2, dec!(89.999)),
    ])
    .unwrap();

    assert_eq!(summary.average_percentage, dec!(90.00));
    assert_eq!(summary.overall_grade, LetterGrade::A);
}

#[test]
fn test_report_card_summary_means_and_pass_counts() {
    let summary = SummaryService::summarize_report_cards(&[
        card(dec!(92), dec!(4.0), dec!(96)),
        card(dec!(64), dec!(2.0), dec!(88)),
        card(dec!(55), dec!(0.0), dec!(70)),
    ])
    .unwrap();

    assert_eq!(summary.total_subjects, 3);
    assert_eq!(summary.overall_percentage, dec!(70.33));
    assert_eq!(summary.overall_grade, LetterGrade::CPlus);
    assert_eq!(summary.overall_gpa, dec!(2.00));
    assert_eq!(summary.overall_attendance, dec!(84.67));
    assert_eq!(summary.subjects_passed, 2);
    assert_eq!(summary.subjects_failed, 1);
}

#[test]
fn test_pass_threshold_is_inclusive_at_sixty() {
    let summary =
        SummaryService::summarize_report_cards(&[card(dec!(60), dec!(2.0), dec!(100))]).unwrap();
    assert_eq!(summary.subjects_passed, 1);
    assert_eq!(summary.subjects_failed, 0);
}

#[test]
fn test_cohort_averaging_is_two_level() {
    // Student A: 100% and 0% (mean 50). Student B: one card at 60%.
    // Cohort mean must be mean(50, 60) = 55, not mean(100, 0, 60) = 53.33.
    let a = UserId::new();
    let b = UserId::new();
    let summary = SummaryService::summarize_cohort(&[
        CohortGradeRow {
            student_id: a,
            percentage: dec!(100),
        },
        CohortGradeRow {
            student_id: a,
            percentage: dec!(0),
        },
        CohortGradeRow {
            student_id: b,
            percentage: dec!(60),
        },
    ])
    .unwrap();

    assert_eq!(summary.total_students, 2);
    assert_eq!(summary.average_percentage, dec!(55.00));
    assert_eq!(summary.highest_percentage, dec!(60.00));
    assert_eq!(summary.lowest_percentage, dec!(50.00));

    assert_eq!(summary.students[0].student_id, a);
    assert_eq!(summary.students[0].average_percentage, dec!(50.00));
    assert_eq!(summary.students[0].total_subjects, 2);
    assert_eq!(summary.students[1].student_id, b);
    assert_eq!(summary.students[1].average_percentage, dec!(60.00));
}

#[test]
fn test_empty_cohort_is_no_records() {
    assert_eq!(
        SummaryService::summarize_cohort(&[]),
        Err(SummaryError::NoRecords)
    );
}
