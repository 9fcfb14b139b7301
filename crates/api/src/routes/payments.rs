//! Payment routes: creation, listing, and status transitions.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::page_request};
use acadia_db::{
    entities::sea_orm_active_enums::PaymentStatus,
    repositories::payment::{
        CreatePaymentInput, PaymentError, PaymentFilter, PaymentRepository,
    },
};

/// Creates the payment routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments))
        .route("/payments", post(create_payment))
        .route("/payments/{payment_id}", get(get_payment))
        .route("/payments/{payment_id}/status", put(transition_payment))
}

/// Request body for creating a payment.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Student the payment is for.
    pub student_id: Uuid,
    /// Amount due; must be positive.
    pub amount: Decimal,
    /// ISO-4217 currency code.
    pub currency: String,
    /// What the payment covers (e.g. "tuition").
    pub purpose: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional external reference.
    pub reference: Option<String>,
}

/// Request body for a status transition.
#[derive(Debug, Deserialize)]
pub struct TransitionPaymentRequest {
    /// Status to transition into.
    pub status: PaymentStatus,
}

/// Query parameters for listing payments.
#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    /// Filter by student.
    pub student_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<PaymentStatus>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// GET /payments - List payments.
///
/// Students are always scoped to their own payments.
async fn list_payments(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListPaymentsQuery>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    let mut filter = PaymentFilter {
        student_id: query.student_id,
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
            error!(error = %e, "Failed to list payments");
            map_payment_error(&e)
        }
    }
}

/// POST /payments - Create a pending payment (admin only).
async fn create_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("Admin role required");
    }

    let repo = PaymentRepository::new((*state.db).clone());
    let input = CreatePaymentInput {
        student_id: payload.student_id,
        amount: payload.amount,
        currency: payload.currency,
        purpose: payload.purpose,
        description: payload.description,
        reference: payload.reference,
    };

    match repo.create(input).await {
        Ok(payment) => {
            info!(
                payment_id = %payment.id,
                student_id = %payment.student_id,
                amount = %payment.amount,
                "Payment created"
            );
            (StatusCode::CREATED, Json(payment)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create payment");
            map_payment_error(&e)
        }
    }
}

/// GET `/payments/{payment_id}` - Get one payment.
async fn get_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    match repo.get(payment_id).await {
        Ok(payment) => {
            if auth.is_student() && payment.student_id != auth.user_id() {
                return map_payment_error(&PaymentError::NotFound(payment_id));
            }
            (StatusCode::OK, Json(payment)).into_response()
        }
        Err(e) => map_payment_error(&e),
    }
}

/// PUT `/payments/{payment_id}/status` - Apply a status transition (admin only).
///
/// `paid_at` is set on the first transition into paid and never rewritten.
async fn transition_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
    Json(payload): Json<TransitionPaymentRequest>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("Admin role required");
    }

    let repo = PaymentRepository::new((*state.db).clone());

    match repo.transition(payment_id, payload.status).await {
        Ok(payment) => {
            info!(
                payment_id = %payment.id,
                status = ?payment.status,
                "Payment status updated"
            );
            (StatusCode::OK, Json(payment)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to transition payment");
            map_payment_error(&e)
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

fn map_payment_error(e: &PaymentError) -> axum::response::Response {
    match e {
        PaymentError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Payment not found: {id}")
            })),
        )
            .into_response(),
        PaymentError::NonPositiveAmount(amount) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": format!("Payment amount must be positive, got {amount}")
            })),
        )
            .into_response(),
        PaymentError::Transition(source) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "invalid_transition",
                "message": source.to_string()
            })),
        )
            .into_response(),
        PaymentError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}
