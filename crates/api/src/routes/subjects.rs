//! Subject directory routes.

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
    entities::sea_orm_active_enums::InstitutionType,
    repositories::subject::{
        CreateSubjectInput, SubjectError, SubjectFilter, SubjectRepository, UpdateSubjectInput,
    },
};
use acadia_shared::types::Patch;

/// Creates the subject routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(list_subjects))
        .route("/subjects", post(create_subject))
        .route("/subjects/{subject_id}", get(get_subject))
        .route("/subjects/{subject_id}", put(update_subject))
        .route("/subjects/{subject_id}", delete(delete_subject))
}

/// Request body for creating a subject.
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    /// Subject name.
    pub name: String,
    /// Unique subject code.
    pub code: String,
    /// Description.
    pub description: Option<String>,
    /// Credit hours (defaults to 1).
    pub credits: Option<i32>,
    /// Institution type.
    pub institution_type: InstitutionType,
    /// Class level the subject is taught at.
    pub class_level: Option<i32>,
    /// Department offering the subject.
    pub department: Option<String>,
}

/// Request body for updating a subject.
#[derive(Debug, Deserialize)]
pub struct UpdateSubjectRequest {
    /// New name.
    pub name: Option<String>,
    /// New description (null clears it).
    #[serde(default)]
    pub description: Patch<Option<String>>,
    /// New credit hours.
    pub credits: Option<i32>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Query parameters for listing subjects.
#[derive(Debug, Deserialize)]
pub struct ListSubjectsQuery {
    /// Filter by institution type.
    pub institution_type: Option<InstitutionType>,
    /// Filter by class level.
    pub class_level: Option<i32>,
    /// Filter by department.
    pub department: Option<String>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// GET /subjects - List subjects.
async fn list_subjects(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListSubjectsQuery>,
) -> impl IntoResponse {
    let subject_repo = SubjectRepository::new((*state.db).clone());
    let filter = SubjectFilter {
        institution_type: query.institution_type,
        class_level: query.class_level,
        department: query.department,
        is_active: query.is_active,
    };

    match subject_repo
        .list(filter, page_request(query.page, query.per_page))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list subjects");
            map_subject_error(&e)
        }
    }
}

/// POST /subjects - Create a subject (admin only).
async fn create_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSubjectRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden();
    }

    let subject_repo = SubjectRepository::new((*state.db).clone());
    let input = CreateSubjectInput {
        name: payload.name,
        code: payload.code,
        description: payload.description,
        credits: payload.credits.unwrap_or(1),
        institution_type: payload.institution_type,
        class_level: payload.class_level,
        department: payload.department,
    };

    match subject_repo.create(input).await {
        Ok(subject) => {
            info!(subject_id = %subject.id, code = %subject.code, "Subject created");
            (StatusCode::CREATED, Json(subject)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create subject");
            map_subject_error(&e)
        }
    }
}

/// GET `/subjects/{subject_id}` - Get one subject.
async fn get_subject(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(subject_id): Path<Uuid>,
) -> impl IntoResponse {
    let subject_repo = SubjectRepository::new((*state.db).clone());

    match subject_repo.get(subject_id).await {
        Ok(subject) => (StatusCode::OK, Json(subject)).into_response(),
        Err(e) => map_subject_error(&e),
    }
}

/// PUT `/subjects/{subject_id}` - Update a subject (admin only).
async fn update_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<Uuid>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden();
    }

    let subject_repo = SubjectRepository::new((*state.db).clone());
    let input = UpdateSubjectInput {
        name: payload.name,
        description: payload.description.into_set(),
        credits: payload.credits,
        is_active: payload.is_active,
    };

    match subject_repo.update(subject_id, input).await {
        Ok(subject) => {
            info!(subject_id = %subject.id, "Subject updated");
            (StatusCode::OK, Json(subject)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update subject");
            map_subject_error(&e)
        }
    }
}

/// DELETE `/subjects/{subject_id}` - Delete a subject (admin only).
async fn delete_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(subject_id): Path<Uuid>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden();
    }

    let subject_repo = SubjectRepository::new((*state.db).clone());

    match subject_repo.delete(subject_id).await {
        Ok(()) => {
            info!(subject_id = %subject_id, "Subject deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete subject");
            map_subject_error(&e)
        }
    }
}

fn forbidden() -> axum::response::Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": "Admin role required"
        })),
    )
        .into_response()
}

fn map_subject_error(e: &SubjectError) -> axum::response::Response {
    match e {
        SubjectError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Subject not found: {id}")
            })),
        )
            .into_response(),
        SubjectError::DuplicateCode(code) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_code",
                "message": format!("Subject code already exists: {code}")
            })),
        )
            .into_response(),
        SubjectError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}
