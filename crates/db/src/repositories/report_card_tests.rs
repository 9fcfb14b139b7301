//! Tests for the report card repository.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use super::{ReportCardRepository, to_cohort_rows, to_figures};
use crate::entities::{report_cards, sea_orm_active_enums::InstitutionType};
use crate::repositories::report_card::CohortSelector;

fn mock_report_card(student_id: Uuid, percentage: Decimal) -> report_cards::Model {
    let now = Utc::now().into();
    report_cards::Model {
        id: Uuid::new_v4(),
        student_id,
        teacher_id: Uuid::new_v4(),
        subject_id: Uuid::new_v4(),
        academic_year: "2025-26".to_string(),
        semester: None,
        term: Some("1st Term".to_string()),
        marks_obtained: percentage,
        total_marks: dec!(100),
        percentage,
        letter_grade: acadia_core::grading::scale::letter_grade(percentage).to_string(),
        grade_points: acadia_core::grading::scale::gpa_points(percentage),
        classes_attended: 40,
        total_classes: 45,
        attendance_percentage: dec!(88.8889),
        teacher_remarks: None,
        strengths: None,
        areas_for_improvement: None,
        is_published: true,
        is_final: false,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn to_figures_keeps_stored_derivations() {
    let figures = to_figures(&[mock_report_card(Uuid::new_v4(), dec!(85))]);

    assert_eq!(figures.len(), 1);
    assert_eq!(figures[0].percentage, dec!(85));
    assert_eq!(figures[0].grade_points, dec!(3.7));
    assert_eq!(figures[0].attendance_percentage, dec!(88.8889));
}

#[test]
fn to_cohort_rows_tags_rows_with_their_student() {
    let student_id = Uuid::new_v4();
    let rows = to_cohort_rows(&[mock_report_card(student_id, dec!(60))]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].student_id.into_inner(), student_id);
}

#[tokio::test]
async fn class_summary_averages_per_student_first() {
    let erratic = Uuid::new_v4();
    let steady = Uuid::new_v4();
    // Erratic student: 100 and 0 (mean 50). Steady student: 60.
    // Cohort average is the mean of the per-student means, 55, not the
    // mean of the three raw rows.
    let records = vec![
        mock_report_card(erratic, dec!(100)),
        mock_report_card(erratic, dec!(0)),
        mock_report_card(steady, dec!(60)),
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([records])
        .into_connection();
    let repo = ReportCardRepository::new(db);

    let selector = CohortSelector {
        institution_type: InstitutionType::School,
        class_level: Some(10),
        department: None,
        academic_year: "2025-26".to_string(),
        semester: None,
        term: Some("1st Term".to_string()),
    };
    let summary = repo.class_summary(&[erratic, steady], &selector).await.unwrap();

    assert_eq!(summary.total_students, 2);
    assert_eq!(summary.average_percentage, dec!(55.00));
    assert_eq!(summary.highest_percentage, dec!(60.00));
    assert_eq!(summary.lowest_percentage, dec!(50.00));
}

#[tokio::test]
async fn publish_twice_returns_same_published_records() {
    let mut report_card = mock_report_card(Uuid::new_v4(), dec!(72));
    report_card.is_published = true;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .append_query_results([vec![report_card.clone()], vec![report_card.clone()]])
        .into_connection();
    let repo = ReportCardRepository::new(db);

    let first = repo.publish(&[report_card.id]).await.unwrap();
    let second = repo.publish(&[report_card.id]).await.unwrap();

    // Re-running the batch is a no-op: same rows, still published.
    assert_eq!(first, second);
    assert!(second.iter().all(|record| record.is_published));
}
