//! Course catalog and enrollment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::page_request};
use acadia_db::{
    entities::sea_orm_active_enums::EnrollmentStatus,
    repositories::course::{
        CourseError, CourseFilter, CourseRepository, CreateCourseInput, UpdateCourseInput,
    },
};
use acadia_shared::types::Patch;

/// Creates the course routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses", post(create_course))
        .route("/courses/{course_id}", get(get_course))
        .route("/courses/{course_id}", put(update_course))
        .route("/courses/{course_id}", delete(delete_course))
        .route("/courses/{course_id}/enroll", post(enroll_student))
        .route("/courses/{course_id}/enrollments", get(list_enrollments))
        .route(
            "/enrollments/{enrollment_id}/status",
            put(update_enrollment_status),
        )
        .route(
            "/students/{student_id}/enrollments",
            get(student_enrollments),
        )
}

/// Request body for creating a course.
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    /// Unique course code.
    pub code: String,
    /// Course name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Credit hours (defaults to 1).
    pub credits: Option<i32>,
    /// Teacher running the course.
    pub teacher_id: Uuid,
    /// Enrollment cap (defaults to 30).
    pub max_students: Option<i32>,
}

/// Request body for updating a course.
#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    /// New name.
    pub name: Option<String>,
    /// New description (null clears it).
    #[serde(default)]
    pub description: Patch<Option<String>>,
    /// New credit hours.
    pub credits: Option<i32>,
    /// New teacher.
    pub teacher_id: Option<Uuid>,
    /// New enrollment cap.
    pub max_students: Option<i32>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Request body for enrolling a student.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Student to enroll.
    pub student_id: Uuid,
}

/// Request body for changing an enrollment's status.
#[derive(Debug, Deserialize)]
pub struct UpdateEnrollmentStatusRequest {
    /// New status.
    pub status: EnrollmentStatus,
}

/// Query parameters for listing courses.
#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    /// Filter by teacher.
    pub teacher_id: Option<Uuid>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// GET /courses - List courses.
async fn list_courses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListCoursesQuery>,
) -> impl IntoResponse {
    let course_repo = CourseRepository::new((*state.db).clone());
    let filter = CourseFilter {
        teacher_id: query.teacher_id,
        is_active: query.is_active,
    };

    match course_repo
        .list(filter, page_request(query.page, query.per_page))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list courses");
            map_course_error(&e)
        }
    }
}

/// POST /courses - Create a course (admin only).
async fn create_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden();
    }

    let course_repo = CourseRepository::new((*state.db).clone());
    let input = CreateCourseInput {
        code: payload.code,
        name: payload.name,
        description: payload.description,
        credits: payload.credits.unwrap_or(1),
        teacher_id: payload.teacher_id,
        max_students: payload.max_students.unwrap_or(30),
    };

    match course_repo.create(input).await {
        Ok(course) => {
            info!(course_id = %course.id, code = %course.code, "Course created");
            (StatusCode::CREATED, Json(course)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create course");
            map_course_error(&e)
        }
    }
}

/// GET `/courses/{course_id}` - Get one course.
async fn get_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> impl IntoResponse {
    let course_repo = CourseRepository::new((*state.db).clone());

    match course_repo.get(course_id).await {
        Ok(course) => (StatusCode::OK, Json(course)).into_response(),
        Err(e) => map_course_error(&e),
    }
}

/// PUT `/courses/{course_id}` - Update a course (admin only).
async fn update_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden();
    }

    let course_repo = CourseRepository::new((*state.db).clone());
    let input = UpdateCourseInput {
        name: payload.name,
        description: payload.description.into_set(),
        credits: payload.credits,
        teacher_id: payload.teacher_id,
        max_students: payload.max_students,
        is_active: payload.is_active,
    };

    match course_repo.update(course_id, input).await {
        Ok(course) => {
            info!(course_id = %course.id, "Course updated");
            (StatusCode::OK, Json(course)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update course");
            map_course_error(&e)
        }
    }
}

/// DELETE `/courses/{course_id}` - Delete a course (admin only).
async fn delete_course(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden();
    }

    let course_repo = CourseRepository::new((*state.db).clone());

    match course_repo.delete(course_id).await {
        Ok(()) => {
            info!(course_id = %course_id, "Course deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete course");
            map_course_error(&e)
        }
    }
}

/// POST `/courses/{course_id}/enroll` - Enroll a student.
///
/// Students may enroll themselves; staff may enroll anyone.
async fn enroll_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
    Json(payload): Json<EnrollRequest>,
) -> impl IntoResponse {
    if auth.is_student() && payload.student_id != auth.user_id() {
        return forbidden();
    }

    let course_repo = CourseRepository::new((*state.db).clone());

    match course_repo.enroll(payload.student_id, course_id).await {
        Ok(enrollment) => {
            info!(
                enrollment_id = %enrollment.id,
                student_id = %enrollment.student_id,
                course_id = %course_id,
                "Student enrolled"
            );
            (StatusCode::CREATED, Json(enrollment)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to enroll student");
            map_course_error(&e)
        }
    }
}

/// GET `/courses/{course_id}/enrollments` - List a course's enrollments (staff only).
async fn list_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<Uuid>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden();
    }

    let course_repo = CourseRepository::new((*state.db).clone());

    match course_repo.list_enrollments(course_id).await {
        Ok(enrollments) => (StatusCode::OK, Json(enrollments)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list enrollments");
            map_course_error(&e)
        }
    }
}

/// PUT `/enrollments/{enrollment_id}/status` - Drop or complete an enrollment (staff only).
async fn update_enrollment_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(enrollment_id): Path<Uuid>,
    Json(payload): Json<UpdateEnrollmentStatusRequest>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden();
    }

    let course_repo = CourseRepository::new((*state.db).clone());

    match course_repo
        .update_enrollment_status(enrollment_id, payload.status)
        .await
    {
        Ok(enrollment) => {
            info!(enrollment_id = %enrollment.id, "Enrollment status updated");
            (StatusCode::OK, Json(enrollment)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update enrollment status");
            map_course_error(&e)
        }
    }
}

/// GET `/students/{student_id}/enrollments` - One student's enrollments.
///
/// Students can only see their own; staff can see anyone's.
async fn student_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
) -> impl IntoResponse {
    if auth.is_student() && student_id != auth.user_id() {
        return forbidden();
    }

    let course_repo = CourseRepository::new((*state.db).clone());

    match course_repo.student_enrollments(student_id).await {
        Ok(enrollments) => (StatusCode::OK, Json(enrollments)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list student enrollments");
            map_course_error(&e)
        }
    }
}

fn forbidden() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "Insufficient permissions"
        })),
    )
        .into_response()
}

fn map_course_error(e: &CourseError) -> axum::response::Response {
    match e {
        CourseError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Course not found: {id}")
            })),
        )
            .into_response(),
        CourseError::EnrollmentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Enrollment not found: {id}")
            })),
        )
            .into_response(),
        CourseError::DuplicateCode(code) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_code",
                "message": format!("Course code already exists: {code}")
            })),
        )
            .into_response(),
        CourseError::AlreadyEnrolled {
            student_id,
            course_id,
        } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "already_enrolled",
                "message": format!("Student {student_id} is already enrolled in course {course_id}")
            })),
        )
            .into_response(),
        CourseError::CourseFull(id) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "course_full",
                "message": format!("Course {id} is full")
            })),
        )
            .into_response(),
        CourseError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}
