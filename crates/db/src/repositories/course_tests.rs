//! Tests for the course repository.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use super::{CourseError, CourseRepository, CreateCourseInput};
use crate::entities::{courses, enrollments, sea_orm_active_enums::EnrollmentStatus};

fn mock_course(max_students: i32) -> courses::Model {
    let now = Utc::now().into();
    courses::Model {
        id: Uuid::new_v4(),
        code: "CS101".to_string(),
        name: "Intro to Computer Science".to_string(),
        description: None,
        credits: 3,
        teacher_id: Uuid::new_v4(),
        max_students,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn mock_enrollment(student_id: Uuid, course_id: Uuid) -> enrollments::Model {
    let now = Utc::now().into();
    enrollments::Model {
        id: Uuid::new_v4(),
        student_id,
        course_id,
        status: EnrollmentStatus::Active,
        enrolled_at: now,
        updated_at: now,
    }
}

fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
}

#[tokio::test]
async fn create_rejects_duplicate_code() {
    let existing = mock_course(30);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing]])
        .into_connection();
    let repo = CourseRepository::new(db);

    let result = repo
        .create(CreateCourseInput {
            code: "CS101".to_string(),
            name: "Intro to Computer Science".to_string(),
            description: None,
            credits: 3,
            teacher_id: Uuid::new_v4(),
            max_students: 30,
        })
        .await;

    assert!(matches!(result, Err(CourseError::DuplicateCode(code)) if code == "CS101"));
}

#[tokio::test]
async fn get_returns_not_found_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<courses::Model>::new()])
        .into_connection();
    let repo = CourseRepository::new(db);

    let id = Uuid::new_v4();
    let result = repo.get(id).await;

    assert!(matches!(result, Err(CourseError::NotFound(missing)) if missing == id));
}

#[tokio::test]
async fn enroll_rejects_duplicate_enrollment() {
    let course = mock_course(30);
    let student_id = Uuid::new_v4();
    let existing = mock_enrollment(student_id, course.id);
    let course_id = course.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![course]])
        .append_query_results([vec![existing]])
        .into_connection();
    let repo = CourseRepository::new(db);

    let result = repo.enroll(student_id, course_id).await;

    assert!(matches!(
        result,
        Err(CourseError::AlreadyEnrolled { student_id: s, course_id: c })
            if s == student_id && c == course_id
    ));
}

#[tokio::test]
async fn enroll_rejects_full_course() {
    // Cap of 1 with one active enrollment already in place.
    let course = mock_course(1);
    let course_id = course.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![course]])
        .append_query_results([Vec::<enrollments::Model>::new()])
        .append_query_results([vec![count_row(1)]])
        .into_connection();
    let repo = CourseRepository::new(db);

    let result = repo.enroll(Uuid::new_v4(), course_id).await;

    assert!(matches!(result, Err(CourseError::CourseFull(full)) if full == course_id));
}
