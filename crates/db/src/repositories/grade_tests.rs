//! Tests for the grade repository.
//!
//! Runs against the mock database backend; the derivation rules exercised
//! here are the same ones the live repository applies.

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use acadia_core::grading::LetterGrade;

use super::{GradeError, GradeRepository, to_published};
use crate::entities::{grades, sea_orm_active_enums::AssessmentKind};

fn mock_grade(subject_id: Uuid, percentage: rust_decimal::Decimal) -> grades::Model {
    let now = Utc::now().into();
    grades::Model {
        id: Uuid::new_v4(),
        student_id: Uuid::new_v4(),
        teacher_id: Uuid::new_v4(),
        subject_id,
        assessment_name: "Midterm Exam".to_string(),
        assessment_kind: AssessmentKind::Exam,
        marks_obtained: percentage,
        total_marks: dec!(100),
        percentage,
        letter_grade: acadia_core::grading::scale::letter_grade(percentage).to_string(),
        academic_year: "2025-26".to_string(),
        semester: None,
        term: Some("1st Term".to_string()),
        remarks: None,
        is_published: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn to_published_keeps_subject_and_percentage() {
    let subject_id = Uuid::new_v4();
    let rows = to_published(&[mock_grade(subject_id, dec!(85))]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].subject_id.into_inner(), subject_id);
    assert_eq!(rows[0].percentage, dec!(85));
}

#[tokio::test]
async fn get_returns_not_found_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<grades::Model>::new()])
        .into_connection();
    let repo = GradeRepository::new(db);

    let id = Uuid::new_v4();
    let result = repo.get(id).await;

    assert!(matches!(result, Err(GradeError::NotFound(missing)) if missing == id));
}

#[tokio::test]
async fn get_returns_stored_grade() {
    let grade = mock_grade(Uuid::new_v4(), dec!(92));
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![grade.clone()]])
        .into_connection();
    let repo = GradeRepository::new(db);

    let found = repo.get(grade.id).await.unwrap();

    assert_eq!(found, grade);
}

#[tokio::test]
async fn student_summary_counts_distinct_subjects() {
    let math = Uuid::new_v4();
    let science = Uuid::new_v4();
    // Two assessments in math, one in science: two distinct subjects.
    let records = vec![
        mock_grade(math, dec!(80)),
        mock_grade(math, dec!(90)),
        mock_grade(science, dec!(70)),
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([records])
        .into_connection();
    let repo = GradeRepository::new(db);

    let summary = repo
        .student_summary(Uuid::new_v4(), "2025-26", None, Some("1st Term"))
        .await
        .unwrap();

    assert_eq!(summary.total_subjects, 2);
    assert_eq!(summary.average_percentage, dec!(80.00));
    assert_eq!(summary.overall_grade, LetterGrade::BPlus);
}

#[tokio::test]
async fn student_summary_with_no_records_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<grades::Model>::new()])
        .into_connection();
    let repo = GradeRepository::new(db);

    let result = repo
        .student_summary(Uuid::new_v4(), "2025-26", None, None)
        .await;

    assert!(matches!(result, Err(GradeError::Summary(_))));
}

#[tokio::test]
async fn publish_returns_post_publish_records() {
    let mut grade = mock_grade(Uuid::new_v4(), dec!(75));
    grade.is_published = true;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![grade.clone()]])
        .into_connection();
    let repo = GradeRepository::new(db);

    let published = repo.publish(&[grade.id, Uuid::new_v4()]).await.unwrap();

    // The missing ID is skipped, not an error.
    assert_eq!(published, vec![grade]);
}

#[tokio::test]
async fn publish_twice_returns_same_published_records() {
    let mut grade = mock_grade(Uuid::new_v4(), dec!(75));
    grade.is_published = true;

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
        .append_query_results([vec![grade.clone()], vec![grade.clone()]])
        .into_connection();
    let repo = GradeRepository::new(db);

    let first = repo.publish(&[grade.id]).await.unwrap();
    let second = repo.publish(&[grade.id]).await.unwrap();

    // Re-running the batch is a no-op: same rows, still published.
    assert_eq!(first, second);
    assert!(second.iter().all(|record| record.is_published));
}
