use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::checkouts::dtos::{CheckoutResponseDto, ItemResponseDto};
use crate::features::verification::dtos::{
    SessionStatusResultDto, UpdateCheckoutStatusDto, UpdateItemStatusDto,
    VerificationCheckoutListDto, VerificationItemListDto, VerificationQueryParams,
};
use crate::features::verification::models::{
    ItemStatusUpdate, QueueQuery, SessionStatusUpdate, SessionUpdateOutcome,
};
use crate::features::verification::services::VerificationService;
use crate::shared::types::{ApiResponse, Meta};

/// List sessions awaiting review under one status tab
#[utoipa::path(
    get,
    path = "/verification/checkouts",
    params(VerificationQueryParams),
    responses(
        (status = 200, description = "Queue page", body = ApiResponse<VerificationCheckoutListDto>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "verification"
)]
pub async fn list_checkouts(
    State(service): State<Arc<VerificationService>>,
    AppQuery(params): AppQuery<VerificationQueryParams>,
) -> Result<Json<ApiResponse<VerificationCheckoutListDto>>> {
    let query = QueueQuery::try_from(params)?;
    let page = service.list_sessions_by_status(&query, Utc::now()).await?;

    let data = VerificationCheckoutListDto {
        checkouts: page
            .sessions
            .into_iter()
            .map(|s| CheckoutResponseDto::from_parts(s.checkout, s.items))
            .collect(),
        stats: page.stats.into(),
        page: query.pagination.page,
        limit: query.pagination.limit,
    };

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total: page.total }),
    )))
}

/// Approve or flag every item of a session
#[utoipa::path(
    patch,
    path = "/verification/checkouts/{id}",
    params(
        ("id" = i64, Path, description = "Checkout ID")
    ),
    request_body = UpdateCheckoutStatusDto,
    responses(
        (status = 200, description = "Decision applied, or the session has no items", body = ApiResponse<SessionStatusResultDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Checkout not found")
    ),
    tag = "verification"
)]
pub async fn update_checkout_status(
    State(service): State<Arc<VerificationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCheckoutStatusDto>,
) -> Result<Json<ApiResponse<SessionStatusResultDto>>> {
    let update = SessionStatusUpdate::try_from(dto)?;
    let (items_updated, outcome) = service.set_session_status(id, &update, Utc::now()).await?;

    let message = match outcome {
        SessionUpdateOutcome::Updated => format!("Updated {} item(s)", items_updated),
        SessionUpdateOutcome::NoItems => "Checkout has no items to update".to_string(),
    };

    Ok(Json(ApiResponse::success(
        Some(SessionStatusResultDto {
            checkout_id: id,
            status: update.decision.into(),
            items_updated,
            outcome,
        }),
        Some(message),
        None,
    )))
}

/// List individual items under one status tab
#[utoipa::path(
    get,
    path = "/verification/items",
    params(VerificationQueryParams),
    responses(
        (status = 200, description = "Queue page", body = ApiResponse<VerificationItemListDto>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "verification"
)]
pub async fn list_items(
    State(service): State<Arc<VerificationService>>,
    AppQuery(params): AppQuery<VerificationQueryParams>,
) -> Result<Json<ApiResponse<VerificationItemListDto>>> {
    let query = QueueQuery::try_from(params)?;
    let page = service.list_items_by_status(&query, Utc::now()).await?;

    let data = VerificationItemListDto {
        items: page.items.into_iter().map(Into::into).collect(),
        stats: page.stats.into(),
        page: query.pagination.page,
        limit: query.pagination.limit,
    };

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total: page.total }),
    )))
}

/// Change the verification state of a single item
#[utoipa::path(
    patch,
    path = "/verification/items/{id}",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItemStatusDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Invalid status or empty body"),
        (status = 404, description = "Item not found")
    ),
    tag = "verification"
)]
pub async fn update_item_status(
    State(service): State<Arc<VerificationService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateItemStatusDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let update = ItemStatusUpdate::try_from(dto)?;
    let item = service.set_item_status(id, &update, Utc::now()).await?;

    Ok(Json(ApiResponse::success(Some(item.into()), None, None)))
}
