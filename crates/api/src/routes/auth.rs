//! Authentication routes for login, register, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use acadia_core::auth::{hash_password, verify_password};
use acadia_db::{
    UserRepository,
    entities::{
        sea_orm_active_enums::{InstitutionType, UserRole},
        users,
    },
    repositories::user::CreateUserInput,
};
use acadia_shared::auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    // Find user by email
    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    // Check if user is active
    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    // Verify password
    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login");
        }
    }

    // Generate tokens
    let role = user.role.as_str();
    let access_token = match state.jwt_service.generate_access_token(user.id, role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during login");
        }
    };
    let refresh_token = match state.jwt_service.generate_refresh_token(user.id, role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error("An error occurred during login");
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    let response = LoginResponse {
        user: user_info(user),
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(role) = parse_role(&payload.role) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_role",
                "message": "Role must be one of: student, teacher, admin"
            })),
        )
            .into_response();
    };

    let Some(institution_type) = parse_institution_type(&payload.institution_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_institution_type",
                "message": "Institution type must be one of: school, college"
            })),
        )
            .into_response();
    };

    // Students must carry their cohort key
    if role == UserRole::Student {
        let missing = match institution_type {
            InstitutionType::School => payload.class_level.is_none(),
            InstitutionType::College => payload.department.is_none(),
        };
        if missing {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "missing_cohort",
                    "message": "School students need a class level, college students a department"
                })),
            )
                .into_response();
        }
    }

    // Check if email already exists
    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error("An error occurred during registration");
        }
    }

    // Hash password
    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("An error occurred during registration");
        }
    };

    // Create user
    let input = CreateUserInput {
        full_name: payload.full_name,
        email: payload.email,
        password_hash,
        role,
        institution_type,
        class_level: payload.class_level,
        department: payload.department,
    };
    let user = match user_repo.create(input).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("An error occurred during registration");
        }
    };

    info!(user_id = %user.id, email = %user.email, "New user registered");

    (StatusCode::CREATED, Json(json!({ "user": user_info(user) }))).into_response()
}

/// POST /auth/refresh - Refresh access token using refresh token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    // Validate refresh token
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            let (error, message) = match e {
                acadia_shared::JwtError::Expired => ("token_expired", "Refresh token has expired"),
                _ => ("invalid_token", "Invalid refresh token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    // Generate new access token
    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), &claims.role)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during token refresh");
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response()
}

fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: user.role.as_str().to_string(),
        institution_type: institution_type_to_string(user.institution_type),
        class_level: user.class_level,
        department: user.department,
    }
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}

/// Converts a role string to the enum value.
fn parse_role(s: &str) -> Option<UserRole> {
    match s {
        "student" => Some(UserRole::Student),
        "teacher" => Some(UserRole::Teacher),
        "admin" => Some(UserRole::Admin),
        _ => None,
    }
}

/// Converts an institution type string to the enum value.
fn parse_institution_type(s: &str) -> Option<InstitutionType> {
    match s {
        "school" => Some(InstitutionType::School),
        "college" => Some(InstitutionType::College),
        _ => None,
    }
}

/// Converts `InstitutionType` enum to string.
fn institution_type_to_string(institution_type: InstitutionType) -> String {
    match institution_type {
        InstitutionType::School => "school".to_string(),
        InstitutionType::College => "college".to_string(),
    }
}
