//! Grade routes: CRUD, batch publish, and student summaries.
//!
//! Teachers create and maintain grades; students see only their own
//! published records. Marks fields in update requests are presence-tagged,
//! so sending a field (even as the same value) recomputes the derived
//! columns and omitting it leaves them alone.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::page_request};
use acadia_core::grading::MarksPatch;
use acadia_db::{
    entities::sea_orm_active_enums::AssessmentKind,
    repositories::grade::{
        CreateGradeInput, GradeError, GradeFilter, GradeRepository, UpdateGradeInput,
    },
};
use acadia_shared::types::Patch;

/// Creates the grade routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/grades", get(list_grades))
        .route("/grades", post(create_grade))
        .route("/grades/publish", post(publish_grades))
        .route("/grades/{grade_id}", get(get_grade))
        .route("/grades/{grade_id}", put(update_grade))
        .route("/grades/{grade_id}", delete(delete_grade))
        .route(
            "/students/{student_id}/grades/summary",
            get(student_grade_summary),
        )
}

/// Request body for creating a grade.
#[derive(Debug, Deserialize)]
pub struct CreateGradeRequest {
    /// Student being graded.
    pub student_id: Uuid,
    /// Subject of the assessment.
    pub subject_id: Uuid,
    /// Assessment name.
    pub assessment_name: String,
    /// Assessment category.
    pub assessment_kind: AssessmentKind,
    /// Marks obtained.
    pub marks_obtained: Decimal,
    /// Maximum marks.
    pub total_marks: Decimal,
    /// Academic year.
    pub academic_year: String,
    /// Semester (college).
    pub semester: Option<String>,
    /// Term (school).
    pub term: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

/// Request body for updating a grade.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGradeRequest {
    /// New assessment name.
    pub assessment_name: Option<String>,
    /// New assessment category.
    pub assessment_kind: Option<AssessmentKind>,
    /// New marks obtained; omit to keep the stored value.
    #[serde(default)]
    pub marks_obtained: Patch<Decimal>,
    /// New maximum marks; omit to keep the stored value.
    #[serde(default)]
    pub total_marks: Patch<Decimal>,
    /// New remarks (null clears them).
    #[serde(default)]
    pub remarks: Patch<Option<String>>,
}

/// Request body for batch publishing.
#[derive(Debug, Deserialize)]
pub struct PublishGradesRequest {
    /// IDs to publish; missing IDs are skipped.
    pub grade_ids: Vec<Uuid>,
}

/// Query parameters for listing grades.
#[derive(Debug, Deserialize)]
pub struct ListGradesQuery {
    /// Filter by student.
    pub student_id: Option<Uuid>,
    /// Filter by teacher.
    pub teacher_id: Option<Uuid>,
    /// Filter by subject.
    pub subject_id: Option<Uuid>,
    /// Filter by academic year.
    pub academic_year: Option<String>,
    /// Filter by semester.
    pub semester: Option<String>,
    /// Filter by term.
    pub term: Option<String>,
    /// Filter by published flag.
    pub is_published: Option<bool>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Query parameters for a summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Academic year the summary covers.
    pub academic_year: String,
    /// Semester, if per-semester.
    pub semester: Option<String>,
    /// Term, if per-term.
    pub term: Option<String>,
}

/// GET /grades - List grades.
///
/// Students are always scoped to their own published grades, whatever the
/// query says.
async fn list_grades(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListGradesQuery>,
) -> impl IntoResponse {
    let grade_repo = GradeRepository::new((*state.db).clone());

    let mut filter = GradeFilter {
        student_id: query.student_id,
        teacher_id: query.teacher_id,
        subject_id: query.subject_id,
        academic_year: query.academic_year,
        semester: query.semester,
        term: query.term,
        is_published: query.is_published,
    };
    if auth.is_student() {
        filter.student_id = Some(auth.user_id());
        filter.is_published = Some(true);
    }

    match grade_repo
        .list(filter, page_request(query.page, query.per_page))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list grades");
            map_grade_error(&e)
        }
    }
}

/// POST /grades - Create a grade (teacher only).
async fn create_grade(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateGradeRequest>,
) -> impl IntoResponse {
    if !auth.is_teacher() {
        return forbidden("Teacher role required");
    }

    let grade_repo = GradeRepository::new((*state.db).clone());
    let input = CreateGradeInput {
        student_id: payload.student_id,
        teacher_id: auth.user_id(),
        subject_id: payload.subject_id,
        assessment_name: payload.assessment_name,
        assessment_kind: payload.assessment_kind,
        marks_obtained: payload.marks_obtained,
        total_marks: payload.total_marks,
        academic_year: payload.academic_year,
        semester: payload.semester,
        term: payload.term,
        remarks: payload.remarks,
    };

    match grade_repo.create(input).await {
        Ok(grade) => {
            info!(
                grade_id = %grade.id,
                student_id = %grade.student_id,
                percentage = %grade.percentage,
                "Grade created"
            );
            (StatusCode::CREATED, Json(grade)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create grade");
            map_grade_error(&e)
        }
    }
}

/// GET `/grades/{grade_id}` - Get one grade.
async fn get_grade(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(grade_id): Path<Uuid>,
) -> impl IntoResponse {
    let grade_repo = GradeRepository::new((*state.db).clone());

    match grade_repo.get(grade_id).await {
        Ok(grade) => {
            if auth.is_student() && (grade.student_id != auth.user_id() || !grade.is_published) {
                // Draft grades stay invisible to the student
                return not_found(grade_id);
            }
            (StatusCode::OK, Json(grade)).into_response()
        }
        Err(e) => map_grade_error(&e),
    }
}

/// PUT `/grades/{grade_id}` - Update a grade (owning teacher or admin).
async fn update_grade(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(grade_id): Path<Uuid>,
    Json(payload): Json<UpdateGradeRequest>,
) -> impl IntoResponse {
    let grade_repo = GradeRepository::new((*state.db).clone());

    match require_grade_ownership(&grade_repo, &auth, grade_id).await {
        Ok(()) => {}
        Err(response) => return response,
    }

    let input = UpdateGradeInput {
        assessment_name: payload.assessment_name,
        assessment_kind: payload.assessment_kind,
        marks: MarksPatch {
            marks_obtained: payload.marks_obtained,
            total_marks: payload.total_marks,
        },
        remarks: payload.remarks.into_set(),
    };

    match grade_repo.update(grade_id, input).await {
        Ok(grade) => {
            info!(grade_id = %grade.id, percentage = %grade.percentage, "Grade updated");
            (StatusCode::OK, Json(grade)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update grade");
            map_grade_error(&e)
        }
    }
}

/// DELETE `/grades/{grade_id}` - Delete a grade (owning teacher or admin).
async fn delete_grade(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(grade_id): Path<Uuid>,
) -> impl IntoResponse {
    let grade_repo = GradeRepository::new((*state.db).clone());

    match require_grade_ownership(&grade_repo, &auth, grade_id).await {
        Ok(()) => {}
        Err(response) => return response,
    }

    match grade_repo.delete(grade_id).await {
        Ok(()) => {
            info!(grade_id = %grade_id, "Grade deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete grade");
            map_grade_error(&e)
        }
    }
}

/// POST /grades/publish - Publish a batch of grades (teacher or admin).
async fn publish_grades(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<PublishGradesRequest>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden("Teacher or admin role required");
    }

    let grade_repo = GradeRepository::new((*state.db).clone());

    match grade_repo.publish(&payload.grade_ids).await {
        Ok(grades) => {
            info!(
                requested = payload.grade_ids.len(),
                published = grades.len(),
                "Grades published"
            );
            (StatusCode::OK, Json(json!({ "grades": grades }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to publish grades");
            map_grade_error(&e)
        }
    }
}

/// GET `/students/{student_id}/grades/summary` - Summarize published grades.
///
/// Available to staff, and to the student for their own summary.
async fn student_grade_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    if !auth.is_staff() && auth.user_id() != student_id {
        return forbidden("You may only view your own summary");
    }

    let grade_repo = GradeRepository::new((*state.db).clone());

    match grade_repo
        .student_summary(
            student_id,
            &query.academic_year,
            query.semester.as_deref(),
            query.term.as_deref(),
        )
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => map_grade_error(&e),
    }
}

/// Ensures the caller may modify the grade: its teacher, or an admin.
async fn require_grade_ownership(
    grade_repo: &GradeRepository,
    auth: &AuthUser,
    grade_id: Uuid,
) -> Result<(), axum::response::Response> {
    if auth.is_admin() {
        return Ok(());
    }
    if !auth.is_teacher() {
        return Err(forbidden("Teacher role required"));
    }

    match grade_repo.get(grade_id).await {
        Ok(grade) if grade.teacher_id == auth.user_id() => Ok(()),
        Ok(_) => Err(forbidden("You may only modify grades you recorded")),
        Err(e) => Err(map_grade_error(&e)),
    }
}

fn forbidden(message: &str) -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}

fn not_found(id: Uuid) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": format!("Grade not found: {id}")
        })),
    )
        .into_response()
}

fn map_grade_error(e: &GradeError) -> axum::response::Response {
    match e {
        GradeError::NotFound(id) => not_found(*id),
        GradeError::Grading(source) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_marks",
                "message": source.to_string()
            })),
        )
            .into_response(),
        GradeError::Summary(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "no_records",
                "message": "No published grades match the requested period"
            })),
        )
            .into_response(),
        GradeError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_null_remarks_clears_them() {
        let request: UpdateGradeRequest = serde_json::from_str(r#"{"remarks":null}"#).unwrap();
        assert_eq!(request.remarks, Patch::Set(None));
    }

    #[test]
    fn update_request_omitted_remarks_keeps_them() {
        let request: UpdateGradeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.remarks, Patch::Keep);
    }
}
