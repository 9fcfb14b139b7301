//! Attendance routes: recording, status updates, listings, and rates.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::page_request};
use acadia_db::{
    entities::sea_orm_active_enums::AttendanceStatus,
    repositories::attendance::{
        AttendanceError, AttendanceFilter, AttendanceRepository, RecordAttendanceInput,
    },
};

/// Creates the attendance routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(list_attendance))
        .route("/attendance", post(record_attendance))
        .route("/attendance/{attendance_id}", get(get_attendance))
        .route("/attendance/{attendance_id}/status", put(update_status))
        .route("/students/{student_id}/attendance/rate", get(student_rate))
}

/// Request body for recording attendance.
#[derive(Debug, Deserialize)]
pub struct RecordAttendanceRequest {
    /// Student being marked.
    pub student_id: Uuid,
    /// Date of the class day.
    pub date: NaiveDate,
    /// Initial status (defaults to pending).
    pub status: Option<AttendanceStatus>,
}

/// Request body for a status update.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status.
    pub status: AttendanceStatus,
}

/// Query parameters for listing attendance records.
#[derive(Debug, Deserialize)]
pub struct ListAttendanceQuery {
    /// Filter by student.
    pub student_id: Option<Uuid>,
    /// Filter by teacher.
    pub teacher_id: Option<Uuid>,
    /// Earliest date to include.
    pub from: Option<NaiveDate>,
    /// Latest date to include.
    pub to: Option<NaiveDate>,
    /// Filter by status.
    pub status: Option<AttendanceStatus>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// GET /attendance - List attendance records.
///
/// Students are always scoped to their own records.
async fn list_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListAttendanceQuery>,
) -> impl IntoResponse {
    let repo = AttendanceRepository::new((*state.db).clone());

    let mut filter = AttendanceFilter {
        student_id: query.student_id,
        teacher_id: query.teacher_id,
        from: query.from,
        to: query.to,
        status: query.status,
    };
    if auth.is_student() {
        filter.student_id = Some(auth.user_id());
    }

    match repo
        .list(filter, page_request(query.page, query.per_page))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list attendance");
            map_attendance_error(&e)
        }
    }
}

/// POST /attendance - Record attendance for a student (teacher only).
async fn record_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<RecordAttendanceRequest>,
) -> impl IntoResponse {
    if !auth.is_teacher() {
        return forbidden("Teacher role required");
    }

    let repo = AttendanceRepository::new((*state.db).clone());
    let input = RecordAttendanceInput {
        student_id: payload.student_id,
        teacher_id: auth.user_id(),
        date: payload.date,
        status: payload.status.unwrap_or(AttendanceStatus::Pending),
    };

    match repo.record(input).await {
        Ok(record) => {
            info!(
                attendance_id = %record.id,
                student_id = %record.student_id,
                date = %record.date,
                "Attendance recorded"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to record attendance");
            map_attendance_error(&e)
        }
    }
}

/// GET `/attendance/{attendance_id}` - Get one attendance record.
async fn get_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(attendance_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AttendanceRepository::new((*state.db).clone());

    match repo.get(attendance_id).await {
        Ok(record) => {
            if auth.is_student() && record.student_id != auth.user_id() {
                return map_attendance_error(&AttendanceError::NotFound(attendance_id));
            }
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(e) => map_attendance_error(&e),
    }
}

/// PUT `/attendance/{attendance_id}/status` - Update a record's status (staff only).
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(attendance_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    if !auth.is_staff() {
        return forbidden("Teacher or admin role required");
    }

    let repo = AttendanceRepository::new((*state.db).clone());

    match repo.update_status(attendance_id, payload.status).await {
        Ok(record) => {
            info!(attendance_id = %record.id, status = ?record.status, "Attendance status updated");
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update attendance status");
            map_attendance_error(&e)
        }
    }
}

/// GET `/students/{student_id}/attendance/rate` - A student's attendance rate.
///
/// Available to staff, and to the student for their own rate. Pending
/// days are excluded from the rate.
async fn student_rate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(student_id): Path<Uuid>,
) -> impl IntoResponse {
    if !auth.is_staff() && auth.user_id() != student_id {
        return forbidden("You may only view your own attendance rate");
    }

    let repo = AttendanceRepository::new((*state.db).clone());

    match repo.student_rate(student_id).await {
        Ok(rate) => (
            StatusCode::OK,
            Json(json!({
                "student_id": student_id,
                "attendance_rate": rate
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to compute attendance rate");
            map_attendance_error(&e)
        }
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

fn map_attendance_error(e: &AttendanceError) -> axum::response::Response {
    match e {
        AttendanceError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Attendance record not found: {id}")
            })),
        )
            .into_response(),
        AttendanceError::AlreadyRecorded { student_id, date } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "already_recorded",
                "message": format!("Attendance already recorded for student {student_id} on {date}")
            })),
        )
            .into_response(),
        AttendanceError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}
