use axum::{extract::State, Json};
use ofitsoft_shared::api::{LoginRequest, LoginResponse};

use crate::auth::{create_access_token, verify_password};
use crate::error::AppError;
use crate::routes::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !req.email.eq_ignore_ascii_case(&state.config.admin_email) {
        return Err(AppError::Unauthorized);
    }

    if !verify_password(&req.password, &state.config.admin_password_hash)? {
        tracing::warn!("Failed login attempt for {}", req.email);
        return Err(AppError::Unauthorized);
    }

    let (access_token, expires_at) = create_access_token(
        &state.config.admin_email,
        &state.config.jwt_secret,
        state.config.jwt_expires_in,
    )?;

    tracing::info!("Admin {} logged in", state.config.admin_email);

    Ok(Json(LoginResponse {
        access_token,
        expires_at,
    }))
}
