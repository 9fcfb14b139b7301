//! User management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::page_request};
use acadia_db::{
    UserRepository,
    entities::sea_orm_active_enums::{InstitutionType, UserRole},
    repositories::user::UserFilter,
};

/// Creates the user routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/activate", post(activate_user))
        .route("/users/{user_id}/deactivate", post(deactivate_user))
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Filter by role.
    pub role: Option<UserRole>,
    /// Filter by institution type.
    pub institution_type: Option<InstitutionType>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// GET /users - List users (admin only).
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    if !auth.is_admin() {
        return forbidden("Admin role required");
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let filter = UserFilter {
        role: query.role,
        institution_type: query.institution_type,
        is_active: query.is_active,
    };

    match user_repo.list(filter, page_request(query.page, query.per_page)).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            internal_error()
        }
    }
}

/// GET `/users/{user_id}` - Get one user (self or staff).
async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    if auth.user_id() != user_id && !auth.is_staff() {
        return forbidden("You may only view your own account");
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(user_id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("User not found: {user_id}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to get user");
            internal_error()
        }
    }
}

/// POST `/users/{user_id}/activate` - Re-enable an account (admin only).
async fn activate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    set_active(&state, &auth, user_id, true).await
}

/// POST `/users/{user_id}/deactivate` - Disable an account (admin only).
async fn deactivate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    set_active(&state, &auth, user_id, false).await
}

async fn set_active(
    state: &AppState,
    auth: &AuthUser,
    user_id: Uuid,
    is_active: bool,
) -> axum::response::Response {
    if !auth.is_admin() {
        return forbidden("Admin role required");
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.set_active(user_id, is_active).await {
        Ok(user) => {
            info!(user_id = %user.id, is_active, "User active flag changed");
            (StatusCode::OK, Json(user)).into_response()
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("User not found: {user_id}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update user");
            internal_error()
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
