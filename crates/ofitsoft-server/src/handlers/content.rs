use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use ofitsoft_shared::{api::ContentSummary, Domain};
use serde_json::Value;

use crate::auth::AdminUser;
use crate::error::AppError;
use crate::routes::AppState;

/// Unknown domains are reported as missing rather than invalid.
fn parse_domain(domain: &str) -> Result<Domain, AppError> {
    domain.parse().map_err(|_| AppError::NotFound)
}

/// GET /api/v1/content
pub async fn list_content(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentSummary>>, AppError> {
    Ok(Json(state.repo.list().await?))
}

/// GET /api/v1/content/:domain
pub async fn get_content(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<Value>, AppError> {
    let domain = parse_domain(&domain)?;

    let stored = state
        .repo
        .get(domain.name())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(stored.body))
}

/// PUT /api/v1/content/:domain
///
/// Replaces the whole document. There is no revision check, so concurrent
/// editors overwrite each other.
pub async fn put_content(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Path(domain): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let domain = parse_domain(&domain)?;

    let body = domain
        .normalize(body)
        .map_err(|e| AppError::Validation(format!("Invalid {} document: {}", domain, e)))?;

    let stored = state.repo.put(domain.name(), body).await?;

    tracing::info!(
        domain = %domain,
        admin = %admin.email,
        "Content document saved"
    );

    Ok(Json(stored.body))
}

/// DELETE /api/v1/content/:domain
pub async fn delete_content(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Path(domain): Path<String>,
) -> Result<StatusCode, AppError> {
    let domain = parse_domain(&domain)?;

    if !state.repo.delete(domain.name()).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(domain = %domain, admin = %admin.email, "Content document deleted");

    Ok(StatusCode::NO_CONTENT)
}
