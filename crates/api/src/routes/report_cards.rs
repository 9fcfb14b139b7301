//! Report card routes: CRUD, batch publish, and summaries.
//!
//! A report card's marks group and attendance group are independent:
//! patching one never recomputes the other. The class summary endpoint
//! averages per student first, so cohort statistics are not skewed toward
//! students with more report cards.

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
use acadia_core::report_card::AttendancePatch;
use acadia_db::{
    UserRepository,
    entities::sea_orm_active_enums::InstitutionType,
    repositories::report_card::{
        CohortSelector, CreateReportCardInput, ReportCardError, ReportCardFilter,
        ReportCardRepository, UpdateReportCardInput,
    },
};
use acadia_shared::types::Patch;

/// Creates the report card routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report-cards", get(list_report_cards))
        .route("/report-cards", post(create_report_card))
        .route("/report-cards/publish", post(publish_report_cards))
        .route("/report-cards/class-summary", get(class_summary))
        .route("/report-cards/{report_card_id}", get(get_report_card))
        .route("/report-cards/{report_card_id}", put(update_report_card))
        .route("/report-cards/{report_card_id}", delete(delete_report_card))
        .route(
            "/students/{student_id}/report-cards/summary",
            get(student_report_card_summary),
        )
}

/// Request body for creating a report card.
#[derive(Debug, Deserialize)]
pub struct CreateReportCardRequest {
    /// Student the report card belongs to.
    pub student_id: Uuid,
    /// Subject being reported.
    pub subject_id: Uuid,
    /// Academic year.
    pub academic_year: String,
    /// Semester (college).
    pub semester: Option<String>,
    /// Term (school).
    pub term: Option<String>,
    /// Consolidated marks obtained.
    pub marks_obtained: Decimal,
    /// Consolidated maximum marks.
    pub total_marks: Decimal,
    /// Classes attended (defaults to 0).
    pub classes_attended: Option<u32>,
    /// Classes held (defaults to 0).
    pub total_classes: Option<u32>,
    /// Teacher remarks.
    pub teacher_remarks: Option<String>,
    /// Observed strengths.
    pub strengths: Option<String>,
    /// Areas needing work.
    pub areas_for_improvement: Option<String>,
    /// Final report card flag.
    pub is_final: Option<bool>,
}

/// Request body for updating a report card.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReportCardRequest {
    /// New marks obtained; omit to keep the stored value.
    #[serde(default)]
    pub marks_obtained: Patch<Decimal>,
    /// New maximum marks; omit to keep the stored value.
    #[serde(default)]
    pub total_marks: Patch<Decimal>,
    /// New classes-attended count; omit to keep the stored value.
    #[serde(default)]
    pub classes_attended: Patch<u32>,
    /// New total-classes count; omit to keep the stored value.
    #[serde(default)]
    pub total_classes: Patch<u32>,
    /// New teacher remarks (null clears them).
    #[serde(default)]
    pub teacher_remarks: Patch<Option<String>>,
    /// New strengths (null clears them).
    #[serde(default)]
    pub strengths: Patch<Option<String>>,
    /// New areas for improvement (null clears them).
    #[serde(default)]
    pub areas_for_improvement: Patch<Option<String>>,
    /// New final flag.
    pub is_final: Option<bool>,
}

/// Request body for batch publishing.
#[derive(Debug, Deserialize)]
pub struct PublishReportCardsRequest {
    /// IDs to publish; missing IDs are skipped.
    pub report_card_ids: Vec<Uuid>,
}

/// Query parameters for listing report cards.
#[derive(Debug, Deserialize)]
pub struct ListReportCardsQuery {
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
    /// Filter by final flag.
    pub is_final: Option<bool>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Query parameters for a student summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Academic year the summary covers.
    pub academic_year: String,
    /// Semester, if per-semester.
    pub semester: Option<String>,
    /// Term, if per-term.
    pub term: Option<String>,
}

/// Query parameters for a class summary.
#[derive(Debug, Deserialize)]
pub struct ClassSummaryQuery {
    /// School or college.
    pub institution_type: InstitutionType,
    /// Class level, for school cohorts.
    pub class_level: Option<i32>,
    /// Department, for college cohorts.
    pub department: Option<String>,
    /// Academic year the summary covers.
    pub academic_year: String,
    /// Semester, if per-semester.
    pub semester: Option<String>,
    /// Term, if per-term.
    pub term: Option<String>,
}

/// GET /report-cards - List report cards.
///
/// Students are always scoped to their own published report cards.
async fn list_report_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListReportCardsQuery>,
) -> impl IntoResponse {
    let repo = ReportCardRepository::new((*state.db).clone());

    let mut filter = ReportCardFilter {
        student_id: query.student_id,
        teacher_id: query.teacher_id,
        subject_id: query.subject_id,
        academic_year: query.academic_year,
        semester: query.semester,
        term: query.term,
        is_published: query.is_published,
        is_final: query.is_final,
    };
    if auth.is_student() {
        filter.student_id = Some(auth.user_id());
        filter.is_published = Some(true);
    }

    match repo
        .list(filter, page_request(query.page, query.per_page))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list report cards");
            map_report_card_error(&e)
        }
    }
}

/// POST /report-cards - Create a report card (teacher only).
async fn create_report_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateReportCardRequest>,
) -> impl IntoResponse {
    if !auth.is_teacher() {
        return forbidden("Teacher role required");
    }

    let repo = ReportCardRepository::new((*state.db).clone());
    let input = CreateReportCardInput {
        student_id: payload.student_id,
        teacher_id: auth.user_id(),
        subject_id: payload.subject_id,
        academic_year: payload.academic_year,
        semester: payload.semester,
        term: payload.term,
        marks_obtained: payload.marks_obtained,
        total_marks: payload.total_marks,
        classes_attended: payload.classes_attended.unwrap_or(0),
        total_classes: payload.total_classes.unwrap_or(0),
        teacher_remarks: payload.teacher_remarks,
        strengths: payload.strengths,
        areas_for_improvement: payload.areas_for_improvement,
        is_final: payload.is_final.unwrap_or(false),
    };

    match repo.create(input).await {
        Ok(report_card) => {
            info!(
                report_card_id = %report_card.id,
                student_id = %report_card.student_id,
                percentage = %report_card.percentage,
                "Report card created"
            );
            (StatusCode::CREATED, Json(report_card)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create report card");
            map_report_card_error(&e)
        }
    }
}

/// GET `/report-cards/{report_card_id}` - Get one report card.
async fn get_report_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(report_card_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ReportCardRepository::new((*state.db).clone());

    match repo.get(report_card_id).await {
        Ok(report_card) => {
            if auth.is_student()
                && (report_card.student_id != auth.user_id() || !report_card.is_published)
            {
                return not_found(report_card_id);
            }
            (StatusCode::OK, Json(report_card)).into_response()
        }
        Err(e) => map_report_card_error(&e),
    }
}

/// PUT `/report-cards/{report_card_id}` - Update a report card (owning teacher or admin).
async fn update_report_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(report_card_id): Path<Uuid>,
    Json(payload): Json<UpdateReportCardRequest>,
) -> impl IntoResponse {
    let repo = ReportCardRepository::new((*state.db).clone());

    match require_ownership(&repo, &auth, report_card_id).await {
        Ok(()) => {}
        Err(response) => return response,
    }

    let input = UpdateReportCardInput {
        marks: MarksPatch {
            marks_obtained: payload.marks_obtained,
            total_marks: payload.total_marks,
        },
        attendance: AttendancePatch {
            classes_attended: payload.classes_attended,
            total_classes: payload.total_classes,
        },
        teacher_remarks: payload.teacher_remarks.into_set(),
        strengths: payload.strengths.into_set(),
        areas_for_improvement: payload.areas_for_improvement.into_set(),
        is_final: payload.is_final,
    };

    match repo.update(report_card_id, input).await {
        Ok(report_card) => {
            info!(
                report_card_id = %report_card.id,
                percentage = %report_card.percentage,
                attendance_percentage = %report_card.attendance_percentage,
                "Report card updated"
            );
            (StatusCode::OK, Json(report_card)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update report card");
            map_report_card_error(&e)
        }
    }
}

/// DELETE `/report-cards/{report_card_id}` - Delete a report card (owning teacher or admin).
async fn delete_report_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(report_card_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ReportCardRepository::new((*state.db).clone());

    match require_ownership(&repo, &auth, report_card_id).await {
        Ok(()) => {}
        Err(response) => return response,
    }

    match repo.delete(report_card_id).await {
        Ok(()) => {
            info!(report_card_id = %report_card_id, "Report card deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete report card");
            map_report_card_error(&e)
        }
    }
}

/// POST /report-cards/publish - Publish a batch of report cards (teacher or admin).
async fn publish_report_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<PublishReportCardsRequest>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden("Teacher or admin role required");
    }

    let repo = ReportCardRepository::new((*state.db).clone());

    match repo.publish(&payload.report_card_ids).await {
        Ok(report_cards) => {
            info!(
                requested = payload.report_card_ids.len(),
                published = report_cards.len(),
                "Report cards published"
            );
            (
                StatusCode::OK,
                Json(json!({ "report_cards": report_cards })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to publish report cards");
            map_report_card_error(&e)
        }
    }
}

/// GET `/students/{student_id}/report-cards/summary` - Summarize published report cards.
///
/// Available to staff, and to the student for their own summary.
async fn student_report_card_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    if !auth.is_staff() && auth.user_id() != student_id {
        return forbidden("You may only view your own summary");
    }

    let repo = ReportCardRepository::new((*state.db).clone());

    match repo
        .student_summary(
            student_id,
            &query.academic_year,
            query.semester.as_deref(),
            query.term.as_deref(),
        )
        .await
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => map_report_card_error(&e),
    }
}

/// GET /report-cards/class-summary - Summarize a cohort (staff only).
async fn class_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ClassSummaryQuery>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden("Teacher or admin role required");
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let student_ids = match user_repo
        .cohort_student_ids(
            query.institution_type,
            query.class_level,
            query.department.as_deref(),
        )
        .await
    {
        Ok(ids) => ids,
        Err(e) => {
            error!(error = %e, "Failed to resolve cohort");
            return internal_error();
        }
    };

    let repo = ReportCardRepository::new((*state.db).clone());
    let selector = CohortSelector {
        institution_type: query.institution_type,
        class_level: query.class_level,
        department: query.department,
        academic_year: query.academic_year,
        semester: query.semester,
        term: query.term,
    };

    match repo.class_summary(&student_ids, &selector).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => map_report_card_error(&e),
    }
}

/// Ensures the caller may modify the report card: its teacher, or an admin.
async fn require_ownership(
    repo: &ReportCardRepository,
    auth: &AuthUser,
    report_card_id: Uuid,
) -> Result<(), axum::response::Response> {
    if auth.is_admin() {
        return Ok(());
    }
    if !auth.is_teacher() {
        return Err(forbidden("Teacher role required"));
    }

    match repo.get(report_card_id).await {
        Ok(report_card) if report_card.teacher_id == auth.user_id() => Ok(()),
        Ok(_) => Err(forbidden("You may only modify report cards you issued")),
        Err(e) => Err(map_report_card_error(&e)),
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
            "message": format!("Report card not found: {id}")
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

fn map_report_card_error(e: &ReportCardError) -> axum::response::Response {
    match e {
        ReportCardError::NotFound(id) => not_found(*id),
        ReportCardError::Derivation(source) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_figures",
                "message": source.to_string()
            })),
        )
            .into_response(),
        ReportCardError::Summary(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "no_records",
                "message": "No published report cards match the requested period"
            })),
        )
            .into_response(),
        ReportCardError::Database(_) => internal_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_null_text_fields_clear_them() {
        let request: UpdateReportCardRequest =
            serde_json::from_str(r#"{"teacher_remarks":null,"strengths":null}"#).unwrap();
        assert_eq!(request.teacher_remarks, Patch::Set(None));
        assert_eq!(request.strengths, Patch::Set(None));
        assert_eq!(request.areas_for_improvement, Patch::Keep);
    }
}
