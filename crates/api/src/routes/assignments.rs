//! Assignment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use acadia_db::{
    entities::sea_orm_active_enums::AssignmentKind,
    repositories::assignment::{
        AssignmentError, AssignmentRepository, AssignmentWithStudents, CreateAssignmentInput,
    },
};

/// Creates the assignment routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(list_assignments))
        .route("/assignments", post(create_assignment))
        .route("/assignments/{assignment_id}", get(get_assignment))
        .route("/assignments/{assignment_id}", delete(delete_assignment))
}

/// Request body for creating an assignment.
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    /// Assignment title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Homework or graded assignment.
    pub kind: Option<AssignmentKind>,
    /// Due date.
    pub due_date: chrono::NaiveDate,
    /// Due time on the due date.
    pub due_time: Option<chrono::NaiveTime>,
    /// Students the assignment is issued to.
    pub student_ids: Vec<Uuid>,
}

fn assignment_json(record: AssignmentWithStudents) -> serde_json::Value {
    let mut value = serde_json::to_value(&record.assignment).unwrap_or_default();
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "student_ids".to_string(),
            serde_json::to_value(&record.student_ids).unwrap_or_default(),
        );
    }
    value
}

/// GET /assignments - List assignments.
///
/// Teachers see the assignments they issued; students see the ones issued
/// to them; admins see their own issued list (usually empty).
async fn list_assignments(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let assignment_repo = AssignmentRepository::new((*state.db).clone());

    let result = if auth.is_student() {
        assignment_repo.list_for_student(auth.user_id()).await
    } else {
        assignment_repo.list_by_teacher(auth.user_id()).await
    };

    match result {
        Ok(assignments) => (StatusCode::OK, Json(assignments)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list assignments");
            map_assignment_error(&e)
        }
    }
}

/// POST /assignments - Create an assignment (teacher or admin).
async fn create_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAssignmentRequest>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden();
    }

    let assignment_repo = AssignmentRepository::new((*state.db).clone());
    let input = CreateAssignmentInput {
        title: payload.title,
        description: payload.description,
        kind: payload.kind,
        teacher_id: auth.user_id(),
        due_date: payload.due_date,
        due_time: payload.due_time,
        student_ids: payload.student_ids,
    };

    match assignment_repo.create(input).await {
        Ok(record) => {
            info!(
                assignment_id = %record.assignment.id,
                students = record.student_ids.len(),
                "Assignment created"
            );
            (StatusCode::CREATED, Json(assignment_json(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create assignment");
            map_assignment_error(&e)
        }
    }
}

/// GET `/assignments/{assignment_id}` - Get one assignment.
///
/// Students can only see assignments issued to them.
async fn get_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(assignment_id): Path<Uuid>,
) -> impl IntoResponse {
    let assignment_repo = AssignmentRepository::new((*state.db).clone());

    match assignment_repo.get(assignment_id).await {
        Ok(record) => {
            if auth.is_student() && !record.student_ids.contains(&auth.user_id()) {
                // Students learn nothing about assignments that are not theirs.
                return map_assignment_error(&AssignmentError::NotFound(assignment_id));
            }
            (StatusCode::OK, Json(assignment_json(record))).into_response()
        }
        Err(e) => map_assignment_error(&e),
    }
}

/// DELETE `/assignments/{assignment_id}` - Delete an assignment (owner or admin).
async fn delete_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(assignment_id): Path<Uuid>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden();
    }

    let assignment_repo = AssignmentRepository::new((*state.db).clone());

    let record = match assignment_repo.get(assignment_id).await {
        Ok(record) => record,
        Err(e) => return map_assignment_error(&e),
    };

    if !auth.is_admin() && record.assignment.teacher_id != auth.user_id() {
        return forbidden();
    }

    match assignment_repo.delete(assignment_id).await {
        Ok(()) => {
            info!(assignment_id = %assignment_id, "Assignment deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete assignment");
            map_assignment_error(&e)
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

fn map_assignment_error(e: &AssignmentError) -> axum::response::Response {
    match e {
        AssignmentError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Assignment not found: {id}")
            })),
        )
            .into_response(),
        AssignmentError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}
