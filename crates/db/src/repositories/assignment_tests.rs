//! Tests for the assignment repository.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use super::{AssignmentError, AssignmentRepository};
use crate::entities::{assignments, sea_orm_active_enums::AssignmentKind};

fn mock_assignment(teacher_id: Uuid) -> assignments::Model {
    let now = Utc::now().into();
    assignments::Model {
        id: Uuid::new_v4(),
        title: "Chapter 4 problem set".to_string(),
        description: None,
        kind: Some(AssignmentKind::Homework),
        teacher_id,
        due_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        due_time: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn get_returns_not_found_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<assignments::Model>::new()])
        .into_connection();
    let repo = AssignmentRepository::new(db);

    let id = Uuid::new_v4();
    let result = repo.get(id).await;

    assert!(matches!(result, Err(AssignmentError::NotFound(missing)) if missing == id));
}

#[tokio::test]
async fn list_for_student_resolves_join_links() {
    let assignment = mock_assignment(Uuid::new_v4());
    let link_row = BTreeMap::from([(
        "assignment_id",
        Value::Uuid(Some(Box::new(assignment.id))),
    )]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![link_row]])
        .append_query_results([vec![assignment.clone()]])
        .into_connection();
    let repo = AssignmentRepository::new(db);

    let listed = repo.list_for_student(Uuid::new_v4()).await.unwrap();

    assert_eq!(listed, vec![assignment]);
}
