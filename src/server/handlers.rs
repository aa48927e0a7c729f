//! Route handlers for `/referrals`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::{
    validate_changes, validate_draft, Pagination, Referral, ReferralChanges, ReferralDraft,
    ReferralPage, DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

pub async fn list_referrals(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ReferralPage>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);
    let status = query.status.filter(|s| !s.is_empty());

    let (referrals, total) = state
        .with_repository("Failed to list referrals", move |repo| {
            repo.list(status.as_deref(), limit, offset)
        })
        .await?;

    Ok(Json(ReferralPage {
        referrals,
        pagination: Pagination::new(total, limit, offset),
    }))
}

pub async fn get_referral(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Referral>, ApiError> {
    let id = parse_id(&id)?;
    state
        .with_repository("Failed to fetch referral", move |repo| repo.get(id))
        .await?
        .map(Json)
        .ok_or(ApiError::ReferralNotFound)
}

pub async fn create_referral(
    State(state): State<AppState>,
    body: Result<Json<ReferralDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Referral>), ApiError> {
    let Json(draft) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = validate_draft(draft)?;

    let created = state
        .with_repository("Failed to create referral", move |repo| repo.insert(&new))
        .await?;

    tracing::info!(id = created.id, "Created referral");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_referral(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ReferralChanges>, JsonRejection>,
) -> Result<Json<Referral>, ApiError> {
    let id = parse_id(&id)?;
    const FAILED: &str = "Failed to update referral";

    // Existence is checked before the body so unknown ids always yield 404.
    let existing = state.with_repository(FAILED, move |repo| repo.get(id)).await?;
    if existing.is_none() {
        return Err(ApiError::ReferralNotFound);
    }

    let Json(changes) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let assignments = validate_changes(&changes)?;

    let updated = state
        .with_repository(FAILED, move |repo| repo.update(id, &assignments))
        .await?
        .ok_or(ApiError::ReferralNotFound)?;

    tracing::info!(id, "Updated referral");
    Ok(Json(updated))
}

pub async fn delete_referral(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let removed = state
        .with_repository("Failed to delete referral", move |repo| repo.delete(id))
        .await?;

    if !removed {
        return Err(ApiError::ReferralNotFound);
    }
    tracing::info!(id, "Deleted referral");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

// A non-numeric id can never match a row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::ReferralNotFound)
}
