use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::checkouts::dtos::{
    CheckoutResponseDto, CreateCheckoutDto, ItemResponseDto, UpdateContactDto,
    UpdateItemContentDto,
};
use crate::features::checkouts::models::CreateCheckout;
use crate::features::checkouts::services::CheckoutService;
use crate::shared::types::ApiResponse;

/// Record a checkout session with its items
///
/// Uses the bulk-import shape: the session is not subject to review.
#[utoipa::path(
    post,
    path = "/api/checkouts",
    request_body = CreateCheckoutDto,
    responses(
        (status = 201, description = "Checkout recorded", body = ApiResponse<CheckoutResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "checkouts"
)]
pub async fn create_checkout(
    State(service): State<Arc<CheckoutService>>,
    AppJson(dto): AppJson<CreateCheckoutDto>,
) -> Result<(StatusCode, Json<ApiResponse<CheckoutResponseDto>>)> {
    dto.validate()?;

    let data = CreateCheckout {
        year_range: dto.year_range,
        date: dto.date.unwrap_or_else(Utc::now),
        owner_name: dto.owner_name.trim().to_string(),
        email: dto.email.trim().to_string(),
        housing_assignment: dto.housing_assignment,
        graduation_year: dto.graduation_year,
        needs_approval: false,
        notes: dto.notes,
        items: dto.items.into_iter().map(Into::into).collect(),
    };

    let created = service.create(&data).await?;
    let (checkout, items) = service.get_with_items(created.checkout_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(CheckoutResponseDto::from_parts(checkout, items)),
            Some("Checkout recorded".to_string()),
            None,
        )),
    ))
}

/// Get a checkout session with its items and derived status
#[utoipa::path(
    get,
    path = "/api/checkouts/{id}",
    params(
        ("id" = i64, Path, description = "Checkout ID")
    ),
    responses(
        (status = 200, description = "Checkout found", body = ApiResponse<CheckoutResponseDto>),
        (status = 404, description = "Checkout not found")
    ),
    tag = "checkouts"
)]
pub async fn get_checkout(
    State(service): State<Arc<CheckoutService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CheckoutResponseDto>>> {
    let (checkout, items) = service.get_with_items(id).await?;
    Ok(Json(ApiResponse::success(
        Some(CheckoutResponseDto::from_parts(checkout, items)),
        None,
        None,
    )))
}

/// Correct the owner/contact details of a checkout session
#[utoipa::path(
    patch,
    path = "/api/checkouts/{id}",
    params(
        ("id" = i64, Path, description = "Checkout ID")
    ),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Checkout updated", body = ApiResponse<CheckoutResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Checkout not found")
    ),
    tag = "checkouts"
)]
pub async fn update_checkout_contact(
    State(service): State<Arc<CheckoutService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateContactDto>,
) -> Result<Json<ApiResponse<CheckoutResponseDto>>> {
    dto.validate()?;

    service.update_contact(id, &dto.into()).await?;
    let (checkout, items) = service.get_with_items(id).await?;

    Ok(Json(ApiResponse::success(
        Some(CheckoutResponseDto::from_parts(checkout, items)),
        None,
        None,
    )))
}

/// Correct an item's name, quantity or description
#[utoipa::path(
    patch,
    path = "/api/items/{id}",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItemContentDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Item not found")
    ),
    tag = "checkouts"
)]
pub async fn update_item_content(
    State(service): State<Arc<CheckoutService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateItemContentDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    dto.validate()?;

    let item = service.update_item_content(id, &dto.into()).await?;
    Ok(Json(ApiResponse::success(Some(item.into()), None, None)))
}
