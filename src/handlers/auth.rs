use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use crate::dtos::auth_dtos::{AuthResponse, LoginRequest, RegisterRequest};
use crate::dtos::ApiResponse;
use crate::errors::Result;
use crate::models::user::{Claims, User, UserRole};
use crate::services::auth_service::RegisterInput;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    payload.validate()?;
    tracing::info!("POST /auth/login for {}", payload.email);

    let (token, user) = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::ok("Login successful", AuthResponse::bearer(token, user))))
}

/// Self-registration always yields a regular user.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>)> {
    payload.validate()?;
    tracing::info!("POST /auth/register for {}", payload.email);

    let user = state
        .auth
        .register(RegisterInput {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: UserRole::User,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User registered successfully", user)),
    ))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<User>>> {
    let user = state.auth.get_user(claims.user_id()?).await?;
    Ok(Json(ApiResponse::ok("Profile retrieved successfully", user)))
}
