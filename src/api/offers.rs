//! Offer API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::{Acknowledgment, ApiResult};
use crate::errors::{messages, AppError};
use crate::models::{CreateOfferRequest, Offer, OfferSummary, UpdateOfferRequest};
use crate::AppState;

/// GET /api/offers - List offer titles and slugs, newest first.
pub async fn list_offers(State(state): State<AppState>) -> ApiResult<Json<Vec<OfferSummary>>> {
    let offers = state
        .repo
        .list_offers()
        .await
        .map_err(|e| e.log("fetching offers"))?;

    Ok(Json(offers))
}

/// GET /api/offers/:slug - Get a single offer.
pub async fn get_offer(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Offer>> {
    match state.repo.get_offer(&slug).await {
        Ok(Some(offer)) => Ok(Json(offer)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(e.log("fetching offer")),
    }
}

/// POST /api/offers - Create a new offer.
pub async fn create_offer(
    State(state): State<AppState>,
    body: Result<Json<CreateOfferRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Offer>)> {
    let Json(request) = body?;
    let new_offer = request.validate()?;

    let offer = state
        .repo
        .create_offer(&new_offer)
        .await
        .map_err(|e| e.log("creating offer"))?;

    tracing::info!(slug = %offer.slug, "Created offer");
    Ok((StatusCode::CREATED, Json(offer)))
}

/// PUT /api/offers/:slug - Replace title and data of an offer.
pub async fn update_offer(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Result<Json<UpdateOfferRequest>, JsonRejection>,
) -> ApiResult<Json<Offer>> {
    let Json(request) = body?;
    let changes = request.validate()?;

    match state.repo.update_offer(&slug, &changes).await {
        Ok(Some(offer)) => Ok(Json(offer)),
        Ok(None) => Err(not_found()),
        Err(e) => Err(e.log("updating offer")),
    }
}

/// DELETE /api/offers/:slug - Delete an offer. Succeeds even if nothing matched.
pub async fn delete_offer(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Acknowledgment>> {
    let removed = state
        .repo
        .delete_offer(&slug)
        .await
        .map_err(|e| e.log("deleting offer"))?;

    tracing::debug!(slug = %slug, removed, "Deleted offer");
    Ok(Json(Acknowledgment::ok()))
}

fn not_found() -> AppError {
    AppError::NotFound(messages::OFFER_NOT_FOUND.to_string())
}
